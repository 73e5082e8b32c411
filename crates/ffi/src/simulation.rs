use forest_fire_core::StepResult;

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_automaton_mut};
use crate::instance::ForestFireInstance;

/// C-compatible outcome of `forest_fire_step`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestFireStepResult {
    /// A tick was executed and cells are still burning or cooling.
    Running = 0,
    /// No active cells were left; final statistics are available.
    JustCompleted = 1,
    /// Completion was already reported; nothing changed.
    AlreadyComplete = 2,
}

impl From<StepResult> for ForestFireStepResult {
    fn from(result: StepResult) -> Self {
        match result {
            StepResult::Running => Self::Running,
            StepResult::JustCompleted => Self::JustCompleted,
            StepResult::AlreadyComplete => Self::AlreadyComplete,
        }
    }
}

/// Advance the automaton by exactly one tick.
///
/// Thread-safe: acquires the `RwLock` write lock for the whole tick.
///
/// Returns
/// - `ForestFireErrorCode::Ok` with the tick outcome written to `out_result`
/// - `ForestFireErrorCode::NullPointer` if `ptr` or `out_result` is null
/// - `ForestFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `forest_fire_new`.
/// - `out_result` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_step(
    ptr: *const ForestFireInstance,
    out_result: *mut ForestFireStepResult,
) -> ForestFireErrorCode {
    if out_result.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_result"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr)? };
        let result = with_automaton_mut(instance, forest_fire_core::FireAutomaton::step)?;
        unsafe {
            *out_result = result.into();
        }
        Ok::<(), DefaultForestFireError>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{forest_fire_destroy, forest_fire_new, ForestFireConfig};
    use std::ptr;

    #[test]
    fn test_step_until_complete() {
        let config = ForestFireConfig {
            width: 4,
            height: 2,
            density: 0.0,
            wrap_horizontal: false,
            wrap_vertical: false,
            ember_stages: 0,
            seed: 0,
        };
        let mut instance = ptr::null_mut();
        unsafe {
            assert_eq!(forest_fire_new(config, &mut instance), ForestFireErrorCode::Ok);

            let mut result = ForestFireStepResult::Running;
            assert_eq!(forest_fire_step(instance, &mut result), ForestFireErrorCode::Ok);
            assert_eq!(result, ForestFireStepResult::Running);

            assert_eq!(forest_fire_step(instance, &mut result), ForestFireErrorCode::Ok);
            assert_eq!(result, ForestFireStepResult::JustCompleted);

            assert_eq!(forest_fire_step(instance, &mut result), ForestFireErrorCode::Ok);
            assert_eq!(result, ForestFireStepResult::AlreadyComplete);

            forest_fire_destroy(instance);
        }
    }

    #[test]
    fn test_step_null_pointers() {
        let mut result = ForestFireStepResult::Running;
        let code = unsafe { forest_fire_step(ptr::null(), &mut result) };
        assert_eq!(code, ForestFireErrorCode::NullPointer);

        let code = unsafe { forest_fire_step(ptr::null(), ptr::null_mut()) };
        assert_eq!(code, ForestFireErrorCode::NullPointer);
    }
}
