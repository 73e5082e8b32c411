//! Dense 2D forest grid with bounded or wrapped coordinate resolution
//!
//! Cells are stored row-major (`y * width + x`) in a single allocation that is
//! never resized after construction.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core_types::{CellState, FireError, FireResult, Topology};

/// Grid coordinate `(x, y)`, already resolved into `[0, width) x [0, height)`.
pub type Coord = (usize, usize);

/// 4-connected neighbour offsets: West, East, South, North.
pub const CARDINAL: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Rectangular store of cell states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct ForestGrid {
    width: usize,
    height: usize,
    /// Cells in row-major order: [y * width + x]
    cells: Vec<CellState>,
}

/// Unchecked serialized form, validated into a [`ForestGrid`]
#[derive(Deserialize)]
struct GridParts {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl TryFrom<GridParts> for ForestGrid {
    type Error = FireError;

    fn try_from(parts: GridParts) -> FireResult<Self> {
        Self::from_cells(parts.width, parts.height, parts.cells)
    }
}

impl ForestGrid {
    /// Build a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// [`FireError::Configuration`] if a dimension is zero or `cells` does not
    /// hold exactly `width * height` states.
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellState>) -> FireResult<Self> {
        if width == 0 || height == 0 {
            return Err(FireError::configuration(
                "cells",
                format!("grid dimensions must be positive, got {width}x{height}"),
            ));
        }
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(FireError::configuration(
                "cells",
                format!("expected {width}x{height} states, got {}", cells.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid filled with `state`.
    pub fn filled(width: usize, height: usize, state: CellState) -> Self {
        Self {
            width,
            height,
            cells: vec![state; width * height],
        }
    }

    /// Create a random forest.
    ///
    /// Draws exactly one value per cell in row-major order, so a seeded `rng`
    /// always produces the same grid.
    pub fn random<R: Rng>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let total_cells = width * height;
        let mut cells = Vec::with_capacity(total_cells);

        for _ in 0..total_cells {
            let state = if rng.random::<f64>() < density {
                CellState::Tree
            } else {
                CellState::Empty
            };
            cells.push(state);
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn out_of_range(&self, x: usize, y: usize) -> FireError {
        FireError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Read a cell.
    ///
    /// # Errors
    ///
    /// [`FireError::OutOfRange`] if `(x, y)` lies outside the grid. Wrapping is
    /// not applied here; use [`ForestGrid::resolve`] first.
    pub fn get(&self, x: usize, y: usize) -> FireResult<CellState> {
        if self.in_bounds(x, y) {
            Ok(self.cells[self.cell_index(x, y)])
        } else {
            Err(self.out_of_range(x, y))
        }
    }

    /// Overwrite a cell. No transition validation happens at this layer.
    ///
    /// # Errors
    ///
    /// [`FireError::OutOfRange`] if `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> FireResult<()> {
        if self.in_bounds(x, y) {
            let idx = self.cell_index(x, y);
            self.cells[idx] = state;
            Ok(())
        } else {
            Err(self.out_of_range(x, y))
        }
    }

    /// Infallible read for coordinates produced by [`ForestGrid::resolve`].
    #[inline]
    pub(crate) fn state_at(&self, (x, y): Coord) -> CellState {
        self.cells[self.cell_index(x, y)]
    }

    /// Infallible write for coordinates produced by [`ForestGrid::resolve`].
    #[inline]
    pub(crate) fn set_state_at(&mut self, (x, y): Coord, state: CellState) {
        let idx = self.cell_index(x, y);
        self.cells[idx] = state;
    }

    /// Map a possibly out-of-range coordinate onto the grid.
    ///
    /// Each axis is wrapped independently when its flag is set. Returns `None`
    /// when a non-wrapped axis is out of range in either direction.
    pub fn resolve(&self, x: i64, y: i64, topology: Topology) -> Option<Coord> {
        let x = resolve_axis(x, self.width, topology.wrap_horizontal)?;
        let y = resolve_axis(y, self.height, topology.wrap_vertical)?;
        Some((x, y))
    }

    /// Resolved 4-connected neighbours of `(x, y)`, in West, East, South, North
    /// order. Out-of-bounds neighbours are `None`. The array is owned, so the
    /// grid can be written while walking it.
    pub fn neighbors(&self, (x, y): Coord, topology: Topology) -> [Option<Coord>; 4] {
        let (x, y) = (x as i64, y as i64);
        CARDINAL.map(|(dx, dy)| self.resolve(x + dx, y + dy, topology))
    }

    /// Number of cells matching `predicate`.
    pub fn count(&self, predicate: impl Fn(CellState) -> bool) -> usize {
        self.cells.iter().filter(|&&state| predicate(state)).count()
    }
}

fn resolve_axis(value: i64, len: usize, wrap: bool) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    if (0..len).contains(&value) {
        Some(value as usize)
    } else if wrap {
        Some(value.rem_euclid(len) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_get_and_set() {
        let mut grid = ForestGrid::filled(4, 3, CellState::Empty);
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.cells().len(), 12);

        grid.set(3, 2, CellState::Tree).unwrap();
        assert_eq!(grid.get(3, 2).unwrap(), CellState::Tree);
        // row-major: last cell
        assert_eq!(grid.cells()[11], CellState::Tree);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = ForestGrid::filled(4, 3, CellState::Empty);
        assert_eq!(
            grid.get(4, 0),
            Err(FireError::OutOfRange {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(grid.get(0, 3).is_err());
        assert!(grid.set(10, 10, CellState::Tree).is_err());
    }

    #[test]
    fn test_set_does_not_validate_transitions() {
        let mut grid = ForestGrid::filled(2, 2, CellState::Burned);
        grid.set(0, 0, CellState::Tree).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), CellState::Tree);
    }

    #[test]
    fn test_resolve_bounded() {
        let grid = ForestGrid::filled(5, 4, CellState::Empty);
        assert_eq!(grid.resolve(2, 3, Topology::BOUNDED), Some((2, 3)));
        assert_eq!(grid.resolve(-1, 0, Topology::BOUNDED), None);
        assert_eq!(grid.resolve(5, 0, Topology::BOUNDED), None);
        assert_eq!(grid.resolve(0, -1, Topology::BOUNDED), None);
        assert_eq!(grid.resolve(0, 4, Topology::BOUNDED), None);
    }

    #[test]
    fn test_resolve_wraps_each_axis_independently() {
        let grid = ForestGrid::filled(5, 4, CellState::Empty);
        let horizontal = Topology::new(true, false);
        assert_eq!(grid.resolve(-1, 1, horizontal), Some((4, 1)));
        assert_eq!(grid.resolve(5, 1, horizontal), Some((0, 1)));
        assert_eq!(grid.resolve(1, -1, horizontal), None);

        let vertical = Topology::new(false, true);
        assert_eq!(grid.resolve(1, -1, vertical), Some((1, 3)));
        assert_eq!(grid.resolve(1, 4, vertical), Some((1, 0)));
        assert_eq!(grid.resolve(-1, 1, vertical), None);

        assert_eq!(grid.resolve(-1, -1, Topology::TORUS), Some((4, 3)));
        assert_eq!(grid.resolve(12, 9, Topology::TORUS), Some((2, 1)));
    }

    #[test]
    fn test_neighbors_skip_out_of_bounds() {
        let grid = ForestGrid::filled(3, 3, CellState::Empty);
        assert_eq!(
            grid.neighbors((0, 0), Topology::BOUNDED),
            [None, Some((1, 0)), Some((0, 1)), None]
        );

        let center: Vec<_> = grid.neighbors((1, 1), Topology::BOUNDED).into_iter().flatten().collect();
        assert_eq!(center, vec![(0, 1), (2, 1), (1, 2), (1, 0)]);

        let wrapped: Vec<_> = grid.neighbors((0, 0), Topology::TORUS).into_iter().flatten().collect();
        assert_eq!(wrapped, vec![(2, 0), (1, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_from_cells_checks_length() {
        let grid = ForestGrid::from_cells(2, 2, vec![CellState::Tree; 4]).unwrap();
        assert_eq!(grid, ForestGrid::filled(2, 2, CellState::Tree));

        assert!(matches!(
            ForestGrid::from_cells(3, 3, vec![CellState::Tree; 4]),
            Err(FireError::Configuration { parameter: "cells", .. })
        ));
        assert!(matches!(
            ForestGrid::from_cells(0, 4, Vec::new()),
            Err(FireError::Configuration { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_short_cells() {
        let parts = GridParts {
            width: 4,
            height: 4,
            cells: vec![CellState::Empty; 3],
        };
        assert!(ForestGrid::try_from(parts).is_err());
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty = ForestGrid::random(10, 10, 0.0, &mut rng);
        assert_eq!(empty.count(CellState::is_tree), 0);

        let full = ForestGrid::random(10, 10, 1.0, &mut rng);
        assert_eq!(full.count(CellState::is_tree), 100);
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = ForestGrid::random(16, 16, 0.5, &mut StdRng::seed_from_u64(42));
        let b = ForestGrid::random(16, 16, 0.5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
