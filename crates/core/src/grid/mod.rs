//! Grid storage and coordinate resolution

pub mod forest_grid;

// Re-export main types
pub use forest_grid::*;
