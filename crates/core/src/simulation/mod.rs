//! Fire propagation engine
//!
//! `FireAutomaton` owns the grid and both frontiers. The host calls
//! [`FireAutomaton::step`] once per discrete tick; each call completes a whole
//! tick before returning.
//!
//! Within a tick:
//! 1. Every cell that was burning when the tick began spreads fire to its
//!    4-connected `Tree` neighbours, then starts cooling.
//! 2. Newly ignited neighbours join the burning frontier only after all
//!    sources ran, so they spread on the next tick.
//! 3. Every cell that was an ember when the tick began cools by one stage.
//!
//! Both frontier sizes are captured before anything is mutated. Cells that
//! join a frontier during the tick are never processed in that same tick.

pub mod frontier;
pub mod statistics;

pub use frontier::Frontier;
pub use statistics::FireStatistics;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::{CellState, FireConfig, FireResult, Topology};
use crate::grid::{Coord, ForestGrid};

/// Outcome of a single [`FireAutomaton::step`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepResult {
    /// A tick was executed and cells are still active
    Running,
    /// No active cells were left; final statistics are now available
    JustCompleted,
    /// Completion was already reported; nothing changed
    AlreadyComplete,
}

/// Percolation-style forest fire on a 2D grid
#[derive(Debug, Clone)]
pub struct FireAutomaton {
    config: FireConfig,
    grid: ForestGrid,

    /// Cells currently `Burning`
    burning: Frontier,
    /// Cells currently in an ember stage
    embers: Frontier,

    /// Ignitions collected during a tick, committed after all sources ran.
    /// Kept between ticks to reuse the allocation.
    ignitions: Vec<Coord>,

    /// Ticks executed so far
    tick: u64,
    completion_tick: Option<u64>,
    final_statistics: Option<FireStatistics>,
}

impl FireAutomaton {
    /// Create an engine with the default number of ember stages.
    ///
    /// # Errors
    ///
    /// [`crate::FireError::Configuration`] for a zero dimension or a density
    /// outside `[0, 1]`.
    pub fn new(
        width: usize,
        height: usize,
        density: f64,
        wrap_horizontal: bool,
        wrap_vertical: bool,
        seed: u64,
    ) -> FireResult<Self> {
        Self::from_config(
            FireConfig::new(width, height, density)
                .with_wrap(wrap_horizontal, wrap_vertical)
                .with_seed(seed),
        )
    }

    /// Seed the forest and ignite the whole left column.
    ///
    /// One random draw is taken per cell in row-major order, including
    /// column 0, before that column is forced to `Burning`. The same config
    /// therefore always yields the same grid.
    ///
    /// # Errors
    ///
    /// [`crate::FireError::Configuration`] if [`FireConfig::validate`] fails.
    pub fn from_config(config: FireConfig) -> FireResult<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut grid = ForestGrid::random(config.width, config.height, config.density, &mut rng);

        let capacity = grid.cells().len();
        let mut burning = Frontier::with_capacity(capacity);
        let embers = Frontier::with_capacity(capacity);

        for y in 0..config.height {
            grid.set_state_at((0, y), CellState::Burning);
            burning.push((0, y));
        }

        info!(
            "Fire automaton initialized: {}x{} grid, density={:.3}, wrap=({}, {}), ember_stages={}, seed={}",
            config.width,
            config.height,
            config.density,
            config.wrap_horizontal,
            config.wrap_vertical,
            config.ember_stages,
            config.seed
        );

        Ok(Self {
            config,
            grid,
            burning,
            embers,
            ignitions: Vec::with_capacity(config.height * 2),
            tick: 0,
            completion_tick: None,
            final_statistics: None,
        })
    }

    /// Advance exactly one tick.
    ///
    /// Returns [`StepResult::JustCompleted`] once, on the first call that finds
    /// no burning or ember cells, and [`StepResult::AlreadyComplete`] on every
    /// call after that without touching any state.
    pub fn step(&mut self) -> StepResult {
        if self.completion_tick.is_some() {
            return StepResult::AlreadyComplete;
        }

        if self.burning.is_empty() && self.embers.is_empty() {
            let stats = FireStatistics::from_cells(self.grid.cells());
            self.completion_tick = Some(self.tick);
            self.final_statistics = Some(stats);
            info!(
                "Fire extinguished after {} ticks: burned_fraction={:.4} ({} of {} flammable cells)",
                self.tick,
                stats.burned_fraction(),
                stats.ignited(),
                stats.flammable()
            );
            return StepResult::JustCompleted;
        }

        // Snapshot both frontiers before anything moves
        let burning_sources = self.burning.len();
        let cooling_embers = self.embers.len();

        self.spread_fire(burning_sources);
        self.cool_embers(cooling_embers);
        self.tick += 1;

        debug!(
            "Tick {}: {} sources, {} ignitions, {} burning, {} embers",
            self.tick,
            burning_sources,
            self.ignitions.len(),
            self.burning.len(),
            self.embers.len()
        );

        StepResult::Running
    }

    /// Process the first `count` burning cells: ignite their tree neighbours,
    /// then move each source into its first cooling stage.
    fn spread_fire(&mut self, count: usize) {
        let topology = self.config.topology();
        let ember_stages = self.config.ember_stages;
        self.ignitions.clear();

        for _ in 0..count {
            let Some(source) = self.burning.pop() else {
                break;
            };
            for target in self.grid.neighbors(source, topology).into_iter().flatten() {
                let Some(ignited) = self.grid.state_at(target).ignite() else {
                    continue;
                };
                if self.burning.contains(target) || self.embers.contains(target) {
                    continue;
                }
                // Marking the cell now keeps a second source from collecting it again
                self.grid.set_state_at(target, ignited);
                self.ignitions.push(target);
            }

            let cooled = self.grid.state_at(source).advance(ember_stages);
            self.grid.set_state_at(source, cooled);
            if cooled.is_ember() {
                self.embers.push(source);
            }
        }

        for &target in &self.ignitions {
            self.burning.push(target);
        }
    }

    /// Cool the first `count` embers by one stage. Embers leaving the coolest
    /// stage become `Burned` and drop out of both frontiers for good.
    fn cool_embers(&mut self, count: usize) {
        let ember_stages = self.config.ember_stages;

        for _ in 0..count {
            let Some(coord) = self.embers.pop() else {
                break;
            };
            let cooled = self.grid.state_at(coord).advance(ember_stages);
            self.grid.set_state_at(coord, cooled);
            if cooled.is_ember() {
                self.embers.push(coord);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion_tick.is_some()
    }

    /// Tick at which the fire was found extinguished, once complete
    pub fn completion_tick(&self) -> Option<u64> {
        self.completion_tick
    }

    /// Ticks executed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Read a cell for reporting or visualization.
    ///
    /// # Errors
    ///
    /// [`crate::FireError::OutOfRange`] outside `[0, width) x [0, height)`.
    pub fn cell_state(&self, x: usize, y: usize) -> FireResult<CellState> {
        self.grid.get(x, y)
    }

    /// Final statistics once complete, live counts while running
    pub fn statistics(&self) -> FireStatistics {
        self.final_statistics
            .unwrap_or_else(|| FireStatistics::from_cells(self.grid.cells()))
    }

    /// Share of ever-flammable cells that caught fire. See
    /// [`FireStatistics::burned_fraction`].
    pub fn burned_fraction(&self) -> f64 {
        self.statistics().burned_fraction()
    }

    pub fn burning_count(&self) -> usize {
        self.burning.len()
    }

    pub fn ember_count(&self) -> usize {
        self.embers.len()
    }

    pub fn burning_frontier(&self) -> &Frontier {
        &self.burning
    }

    pub fn ember_frontier(&self) -> &Frontier {
        &self.embers
    }

    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    pub fn topology(&self) -> Topology {
        self.config.topology()
    }
}
