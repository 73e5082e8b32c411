//! C ABI for the forest fire automaton.
//!
//! Every function returns a [`ForestFireErrorCode`]; on failure a message is
//! kept per thread and can be read with [`forest_fire_get_last_error`].
//! Results are written through out-pointers. The host owns the tick loop and
//! calls [`forest_fire_step`] once per tick.

mod error;
mod helpers;
pub mod instance;
pub mod queries;
pub mod simulation;

pub use error::{forest_fire_get_last_error, forest_fire_get_last_error_code, ForestFireErrorCode};
pub use instance::{forest_fire_destroy, forest_fire_new, ForestFireConfig, ForestFireInstance};
pub use queries::{
    forest_fire_burned_fraction, forest_fire_cell_state, forest_fire_completion_tick,
    forest_fire_dimensions, forest_fire_is_complete, forest_fire_statistics, forest_fire_tick,
    ForestFireStatistics,
};
pub use simulation::{forest_fire_step, ForestFireStepResult};
