use forest_fire_core::{FireAutomaton, FireStatistics};

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_automaton};
use crate::instance::ForestFireInstance;

#[repr(C)]
/// FFI-friendly snapshot of the cell counts.
/// Keep this layout stable for C/C++/C# consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForestFireStatistics {
    /// Cells that never held a tree.
    pub empty: usize,

    /// Trees that have not caught fire (yet).
    pub tree: usize,

    /// Cells burning this tick.
    pub burning: usize,

    /// Cells in any ember stage.
    pub ember: usize,

    /// Cells that finished burning.
    pub burned: usize,
}

impl From<FireStatistics> for ForestFireStatistics {
    fn from(stats: FireStatistics) -> Self {
        Self {
            empty: stats.empty,
            tree: stats.tree,
            burning: stats.burning,
            ember: stats.ember,
            burned: stats.burned,
        }
    }
}

/// Shared body for the single-value queries: null checks, read lock, write.
///
/// # Safety
/// `ptr` must be null or a live instance; `out` must be null or writable.
unsafe fn query<T>(
    ptr: *const ForestFireInstance,
    out: *mut T,
    out_name: &str,
    func: impl FnOnce(&FireAutomaton) -> T,
) -> ForestFireErrorCode {
    if out.is_null() {
        return track_error(&DefaultForestFireError::null_pointer(out_name));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let value = with_automaton(instance, func)?;
        unsafe {
            *out = value;
        }
        Ok::<(), DefaultForestFireError>(())
    })
}

/// Whether the run has completed (no burning or cooling cells remain).
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_complete` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_is_complete(
    ptr: *const ForestFireInstance,
    out_complete: *mut bool,
) -> ForestFireErrorCode {
    unsafe { query(ptr, out_complete, "out_complete", FireAutomaton::is_complete) }
}

/// The tick on which completion was detected.
///
/// `out_has_value` is set to `false` (and `out_tick` to 0) while the run is
/// still going.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_tick` and `out_has_value` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_completion_tick(
    ptr: *const ForestFireInstance,
    out_tick: *mut u64,
    out_has_value: *mut bool,
) -> ForestFireErrorCode {
    if out_has_value.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_has_value"));
    }

    let mut completion = None;
    let read_tick = |automaton: &FireAutomaton| {
        completion = automaton.completion_tick();
        completion.unwrap_or(0)
    };
    let code = unsafe { query(ptr, out_tick, "out_tick", read_tick) };
    if code == ForestFireErrorCode::Ok {
        unsafe {
            *out_has_value = completion.is_some();
        }
    }
    code
}

/// Number of ticks executed so far.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_tick` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_tick(
    ptr: *const ForestFireInstance,
    out_tick: *mut u64,
) -> ForestFireErrorCode {
    unsafe { query(ptr, out_tick, "out_tick", FireAutomaton::tick) }
}

/// State of cell (`x`, `y`) as a byte code.
///
/// 0 = empty, 1 = tree, 2 = burning, 3 = burned, `3 + k` = ember with `k`
/// stages left.
///
/// Returns `ForestFireErrorCode::OutOfRange` if the coordinate is outside the grid.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_state` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_cell_state(
    ptr: *const ForestFireInstance,
    x: usize,
    y: usize,
    out_state: *mut u8,
) -> ForestFireErrorCode {
    if out_state.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_state"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let state = with_automaton(instance, |automaton| automaton.cell_state(x, y))??;
        unsafe {
            *out_state = state.to_code();
        }
        Ok::<(), DefaultForestFireError>(())
    })
}

/// Fraction of flammable cells that have caught fire, in [0, 1].
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_fraction` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_burned_fraction(
    ptr: *const ForestFireInstance,
    out_fraction: *mut f64,
) -> ForestFireErrorCode {
    unsafe { query(ptr, out_fraction, "out_fraction", FireAutomaton::burned_fraction) }
}

/// Cell counts by class. Final counts once the run is complete, live counts otherwise.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_stats` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_statistics(
    ptr: *const ForestFireInstance,
    out_stats: *mut ForestFireStatistics,
) -> ForestFireErrorCode {
    unsafe { query(ptr, out_stats, "out_stats", |automaton| automaton.statistics().into()) }
}

/// Grid width and height in cells.
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_width` and `out_height` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_dimensions(
    ptr: *const ForestFireInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> ForestFireErrorCode {
    if out_height.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_height"));
    }

    let mut height = 0;
    let read_width = |automaton: &FireAutomaton| {
        let (width, h) = automaton.dimensions();
        height = h;
        width
    };
    let code = unsafe { query(ptr, out_width, "out_width", read_width) };
    if code == ForestFireErrorCode::Ok {
        unsafe {
            *out_height = height;
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::forest_fire_get_last_error_code;
    use crate::instance::{forest_fire_destroy, forest_fire_new, ForestFireConfig};
    use crate::simulation::{forest_fire_step, ForestFireStepResult};
    use std::ptr;

    fn new_instance(width: usize, height: usize, density: f64) -> *mut ForestFireInstance {
        let config = ForestFireConfig {
            width,
            height,
            density,
            wrap_horizontal: false,
            wrap_vertical: false,
            ember_stages: 0,
            seed: 3,
        };
        let mut instance = ptr::null_mut();
        let code = unsafe { forest_fire_new(config, &mut instance) };
        assert_eq!(code, ForestFireErrorCode::Ok);
        instance
    }

    fn run_to_completion(instance: *mut ForestFireInstance) {
        let mut result = ForestFireStepResult::Running;
        while result != ForestFireStepResult::JustCompleted {
            let code = unsafe { forest_fire_step(instance, &mut result) };
            assert_eq!(code, ForestFireErrorCode::Ok);
        }
    }

    #[test]
    fn test_cell_state_codes() {
        let instance = new_instance(3, 2, 1.0);
        let mut state = 0;
        unsafe {
            assert_eq!(forest_fire_cell_state(instance, 0, 1, &mut state), ForestFireErrorCode::Ok);
            assert_eq!(state, 2);
            assert_eq!(forest_fire_cell_state(instance, 2, 1, &mut state), ForestFireErrorCode::Ok);
            assert_eq!(state, 1);
            forest_fire_destroy(instance);
        }
    }

    #[test]
    fn test_cell_state_out_of_range() {
        let instance = new_instance(3, 2, 1.0);
        let mut state = 0;
        unsafe {
            let code = forest_fire_cell_state(instance, 3, 0, &mut state);
            assert_eq!(code, ForestFireErrorCode::OutOfRange);
            assert_eq!(forest_fire_get_last_error_code(), ForestFireErrorCode::OutOfRange);
            forest_fire_destroy(instance);
        }
    }

    #[test]
    fn test_completion_queries() {
        let instance = new_instance(4, 3, 0.0);
        let mut complete = true;
        let mut tick = 99;
        let mut has_value = true;
        unsafe {
            assert_eq!(forest_fire_is_complete(instance, &mut complete), ForestFireErrorCode::Ok);
            assert!(!complete);
            assert_eq!(
                forest_fire_completion_tick(instance, &mut tick, &mut has_value),
                ForestFireErrorCode::Ok
            );
            assert!(!has_value);
            assert_eq!(tick, 0);

            run_to_completion(instance);

            assert_eq!(forest_fire_is_complete(instance, &mut complete), ForestFireErrorCode::Ok);
            assert!(complete);
            assert_eq!(
                forest_fire_completion_tick(instance, &mut tick, &mut has_value),
                ForestFireErrorCode::Ok
            );
            assert!(has_value);
            assert_eq!(tick, 1);

            assert_eq!(forest_fire_tick(instance, &mut tick), ForestFireErrorCode::Ok);
            assert_eq!(tick, 1);
            forest_fire_destroy(instance);
        }
    }

    #[test]
    fn test_burned_fraction_and_statistics() {
        let instance = new_instance(5, 4, 0.0);
        run_to_completion(instance);

        let mut fraction = 0.0;
        let mut stats = ForestFireStatistics::default();
        unsafe {
            assert_eq!(forest_fire_burned_fraction(instance, &mut fraction), ForestFireErrorCode::Ok);
            assert!((fraction - 1.0).abs() < f64::EPSILON);

            assert_eq!(forest_fire_statistics(instance, &mut stats), ForestFireErrorCode::Ok);
            assert_eq!(stats.burned, 4);
            assert_eq!(stats.empty, 16);
            assert_eq!(stats.burning + stats.ember + stats.tree, 0);
            forest_fire_destroy(instance);
        }
    }

    #[test]
    fn test_dimensions() {
        let instance = new_instance(7, 3, 0.5);
        let (mut width, mut height) = (0, 0);
        unsafe {
            assert_eq!(
                forest_fire_dimensions(instance, &mut width, &mut height),
                ForestFireErrorCode::Ok
            );
            assert_eq!((width, height), (7, 3));
            forest_fire_destroy(instance);
        }
    }

    #[test]
    fn test_queries_reject_null_pointers() {
        let mut complete = false;
        let code = unsafe { forest_fire_is_complete(ptr::null(), &mut complete) };
        assert_eq!(code, ForestFireErrorCode::NullPointer);

        let instance = new_instance(2, 2, 0.5);
        unsafe {
            let code = forest_fire_burned_fraction(instance, ptr::null_mut());
            assert_eq!(code, ForestFireErrorCode::NullPointer);
            let mut width = 0;
            let code = forest_fire_dimensions(instance, &mut width, ptr::null_mut());
            assert_eq!(code, ForestFireErrorCode::NullPointer);
            forest_fire_destroy(instance);
        }
    }
}
