//! Burned-area accounting over a grid

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core_types::CellState;

/// Cell counts by class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireStatistics {
    pub empty: usize,
    pub tree: usize,
    pub burning: usize,
    /// All ember stages combined
    pub ember: usize,
    pub burned: usize,
}

impl FireStatistics {
    /// Count every cell on the calling thread. This is what the engine uses.
    pub fn from_cells(cells: &[CellState]) -> Self {
        cells.iter().fold(Self::default(), |mut stats, &state| {
            stats.record(state);
            stats
        })
    }

    /// Count every cell on rayon's global pool.
    ///
    /// For hosts summarizing large grids outside the tick loop; the engine
    /// itself never calls this.
    pub fn par_from_cells(cells: &[CellState]) -> Self {
        cells
            .par_iter()
            .fold(Self::default, |mut stats, &state| {
                stats.record(state);
                stats
            })
            .reduce(Self::default, Self::merge)
    }

    fn record(&mut self, state: CellState) {
        match state {
            CellState::Empty => self.empty += 1,
            CellState::Tree => self.tree += 1,
            CellState::Burning => self.burning += 1,
            CellState::Ember(_) => self.ember += 1,
            CellState::Burned => self.burned += 1,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            empty: self.empty + other.empty,
            tree: self.tree + other.tree,
            burning: self.burning + other.burning,
            ember: self.ember + other.ember,
            burned: self.burned + other.burned,
        }
    }

    /// Cells that caught fire: burning, any ember stage, or burned
    pub fn ignited(&self) -> usize {
        self.burning + self.ember + self.burned
    }

    /// Cells that were ever flammable, whether or not they ignited
    pub fn flammable(&self) -> usize {
        self.ignited() + self.tree
    }

    pub fn total(&self) -> usize {
        self.flammable() + self.empty
    }

    /// `ignited / flammable`, or 0.0 when nothing was flammable.
    /// `Empty` cells count in neither.
    pub fn burned_fraction(&self) -> f64 {
        let flammable = self.flammable();
        if flammable == 0 {
            return 0.0;
        }
        self.ignited() as f64 / flammable as f64
    }
}
