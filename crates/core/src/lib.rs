//! Forest Fire Core Library
//!
//! Discrete wildfire propagation on a 2D grid: the classic percolation-style
//! "Fire" cellular automaton. A random forest is ignited along its left edge,
//! fire spreads through 4-connected trees one cell per tick, and burning cells
//! cool through a configurable number of ember stages before burning out.
//!
//! ```
//! use forest_fire_core::{FireAutomaton, FireConfig, StepResult};
//!
//! let config = FireConfig::new(32, 32, 0.6).with_seed(11);
//! let mut automaton = FireAutomaton::from_config(config)?;
//! while automaton.step() != StepResult::JustCompleted {}
//!
//! let fraction = automaton.burned_fraction();
//! assert!((0.0..=1.0).contains(&fraction));
//! # Ok::<(), forest_fire_core::FireError>(())
//! ```
//!
//! The engine performs no I/O and owns no run loop; hosts call
//! [`FireAutomaton::step`] once per tick.

// Core types and utilities
pub mod core_types;

pub mod grid;
pub mod simulation;

// Re-export core types
pub use core_types::{CellState, FireConfig, FireError, FireResult, Topology};
pub use core_types::{DEFAULT_EMBER_STAGES, MAX_EMBER_STAGES};

pub use grid::{Coord, ForestGrid};
pub use simulation::{FireAutomaton, FireStatistics, Frontier, StepResult};
