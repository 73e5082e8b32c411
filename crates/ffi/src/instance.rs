use std::ptr;
use std::sync::RwLock;

use forest_fire_core::{FireAutomaton, FireConfig};

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{track_error, track_result};

/// C-compatible construction parameters.
///
/// Mirrors `forest_fire_core::FireConfig` field for field.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestFireConfig {
    /// Grid width in cells (> 0)
    pub width: usize,
    /// Grid height in cells (> 0)
    pub height: usize,
    /// Probability in [0, 1] that a cell starts as a tree
    pub density: f64,
    /// Wrap column -1 / `width` around
    pub wrap_horizontal: bool,
    /// Wrap row -1 / `height` around
    pub wrap_vertical: bool,
    /// Cooling stages between burning and burned (0 = none)
    pub ember_stages: u8,
    /// Forest generator seed
    pub seed: u64,
}

impl From<ForestFireConfig> for FireConfig {
    fn from(config: ForestFireConfig) -> Self {
        FireConfig::new(config.width, config.height, config.density)
            .with_wrap(config.wrap_horizontal, config.wrap_vertical)
            .with_ember_stages(config.ember_stages)
            .with_seed(config.seed)
    }
}

/// The forest fire engine as seen from a host scheduler.
///
/// # Thread Safety
/// The engine itself is single-threaded. The `RwLock` lets a host read cells
/// from several threads while `forest_fire_step` takes the write lock, so no
/// two steps are ever in flight for the same instance.
pub struct ForestFireInstance {
    pub(crate) automaton: RwLock<FireAutomaton>,
}

impl ForestFireInstance {
    /// Validates the configuration and seeds the grid.
    ///
    /// # Errors
    ///
    /// Returns `ForestFireErrorCode::InvalidConfiguration` if the core rejects the config.
    pub(crate) fn new(config: ForestFireConfig) -> Result<Box<Self>, DefaultForestFireError> {
        let automaton = FireAutomaton::from_config(config.into())?;
        Ok(Box::new(Self {
            automaton: RwLock::new(automaton),
        }))
    }
}

/// Creates a new forest fire instance.
///
/// The grid is seeded from `config.seed` and its left column is ignited.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0): success, `out_instance` contains valid pointer
/// - `ForestFireErrorCode::NullPointer`: `out_instance` is null
/// - `ForestFireErrorCode::InvalidConfiguration`: zero width/height, density outside [0, 1],
///   or too many ember stages
///
/// Call `forest_fire_get_last_error()` for a human-readable description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call `forest_fire_destroy`
///   exactly once.
///
/// Example (C)
/// ```c
/// ForestFireConfig config = { 100, 100, 0.6, false, false, 2, 42 };
/// ForestFireInstance* fire = NULL;
/// if (forest_fire_new(config, &fire) != Ok) {
///     fprintf(stderr, "%s\n", forest_fire_get_last_error());
///     return;
/// }
/// // ... tick ...
/// forest_fire_destroy(fire);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_fire_new(
    config: ForestFireConfig,
    out_instance: *mut *mut ForestFireInstance,
) -> ForestFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_instance"));
    }

    match track_result(ForestFireInstance::new(config)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            ForestFireErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `forest_fire_new`.
///
/// If `ptr` is null this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `forest_fire_new` and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_destroy(ptr: *mut ForestFireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: `ptr` came from `Box::into_raw` in `forest_fire_new` and is not
    // used again by the caller. Dropping the box frees the engine.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
