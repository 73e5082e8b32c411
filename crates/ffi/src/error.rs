use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use forest_fire_core::FireError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait ForestFireError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ForestFireErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `ForestFireError` for the FFI layer.
///
/// Wraps a `ForestFireErrorCode` with a message, and converts core
/// [`FireError`]s into the matching code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultForestFireError {
    code: ForestFireErrorCode,
    msg: String,
}

impl DefaultForestFireError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ForestFireErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"RwLock"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: ForestFireErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }
}

impl From<FireError> for DefaultForestFireError {
    fn from(error: FireError) -> Self {
        let code = match error {
            FireError::Configuration { .. } => ForestFireErrorCode::InvalidConfiguration,
            FireError::OutOfRange { .. } => ForestFireErrorCode::OutOfRange,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl ForestFireError for DefaultForestFireError {
    fn code(&self) -> ForestFireErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by forest fire functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestFireErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid configuration: zero width or height, density outside [0, 1],
    /// or too many ember stages.
    InvalidConfiguration = 3,

    /// Coordinate outside the grid.
    OutOfRange = 4,
}

impl From<DefaultForestFireError> for ForestFireErrorCode {
    fn from(error: DefaultForestFireError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, ForestFireErrorCode)> = const { RefCell::new((None, ForestFireErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ForestFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ForestFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call succeeded.
///
/// # Thread Safety
/// Error messages are stored per-thread (thread-local storage).
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error. **DO NOT FREE THIS POINTER**.
///
/// Example:
/// ```cpp
/// ForestFireInstance* fire = nullptr;
/// ForestFireErrorCode err = forest_fire_new(config, &fire);
/// if (err != ForestFireErrorCode::Ok) {
///     const char* error = forest_fire_get_last_error();
///     if (error) {
///         printf("Forest fire creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn forest_fire_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `ForestFireErrorCode::Ok` (0) if the last call on this thread
/// succeeded, otherwise the code of the failure.
#[no_mangle]
pub extern "C" fn forest_fire_get_last_error_code() -> ForestFireErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = DefaultForestFireError::from(FireError::OutOfRange {
            x: 9,
            y: 0,
            width: 4,
            height: 4,
        });
        assert_eq!(err.code(), ForestFireErrorCode::OutOfRange);
        assert_eq!(err.msg(), "coordinate (9, 0) is outside the 4x4 grid");

        let err = DefaultForestFireError::from(FireError::Configuration {
            parameter: "density",
            message: "must be within [0, 1], got 2".to_string(),
        });
        assert_eq!(err.code(), ForestFireErrorCode::InvalidConfiguration);
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultForestFireError::null_pointer("ptr");
        assert_eq!(err.code(), ForestFireErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'ptr' cannot be null");
    }
}
