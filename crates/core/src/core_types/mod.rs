//! Core types and utilities

pub mod cell;
pub mod config;
pub mod error;

// Re-export
pub use cell::{CellState, MAX_EMBER_STAGES};
pub use config::{FireConfig, Topology, DEFAULT_EMBER_STAGES};
pub use error::{FireError, FireResult};
