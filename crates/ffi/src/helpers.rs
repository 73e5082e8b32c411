use std::ffi::CString;

use forest_fire_core::FireAutomaton;

use crate::error::{with_last_error_mut, DefaultForestFireError, ForestFireError, ForestFireErrorCode};
use crate::instance::ForestFireInstance;

/// Set the thread-local error message and code.
/// Accepts any type implementing `ForestFireError` trait.
pub(crate) fn set_last_error(error: &impl ForestFireError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = ForestFireErrorCode::Ok;
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl ForestFireError) -> ForestFireErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of a fallible operation, mapping the error to its code.
pub(crate) fn track_result<T, E: ForestFireError>(result: Result<T, E>) -> Result<T, ForestFireErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its result into an error code.
pub(crate) fn handle_ffi_result_error<F, E>(f: F) -> ForestFireErrorCode
where
    F: FnOnce() -> Result<(), E>,
    E: ForestFireError,
{
    match track_result(f()) {
        Ok(()) => ForestFireErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the instance behind `ptr`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `forest_fire_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const ForestFireInstance,
) -> Result<&'a ForestFireInstance, DefaultForestFireError> {
    // SAFETY: the caller guarantees `ptr` is null or points to a live instance.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultForestFireError::null_pointer("ptr"))
}

/// Run `func` with shared access to the automaton (`RwLock` read lock).
pub(crate) fn with_automaton<F, T>(
    instance: &ForestFireInstance,
    func: F,
) -> Result<T, DefaultForestFireError>
where
    F: FnOnce(&FireAutomaton) -> T,
{
    let automaton = instance
        .automaton
        .read()
        .map_err(|_| DefaultForestFireError::lock_poisoned("RwLock"))?;
    Ok(func(&automaton))
}

/// Run `func` with exclusive access to the automaton (`RwLock` write lock).
pub(crate) fn with_automaton_mut<F, T>(
    instance: &ForestFireInstance,
    func: F,
) -> Result<T, DefaultForestFireError>
where
    F: FnOnce(&mut FireAutomaton) -> T,
{
    let mut automaton = instance
        .automaton
        .write()
        .map_err(|_| DefaultForestFireError::lock_poisoned("RwLock"))?;
    Ok(func(&mut automaton))
}
