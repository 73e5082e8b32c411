//! Run configuration: grid size, forest density, topology and cooling stages.
//!
//! Hosts own where these values come from (CLI flags, JSON, a scheduler's
//! parameter table). The engine only validates them once at construction.

use serde::{Deserialize, Serialize};

use super::cell::MAX_EMBER_STAGES;
use super::error::{FireError, FireResult};

/// Default number of ember stages between `Burning` and `Burned`.
pub const DEFAULT_EMBER_STAGES: u8 = 2;

/// Per-axis wrap flags, fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Topology {
    /// Column `width` wraps to column 0 and column -1 to `width - 1`
    pub wrap_horizontal: bool,
    /// Row `height` wraps to row 0 and row -1 to `height - 1`
    pub wrap_vertical: bool,
}

impl Topology {
    /// Bounded on both axes
    pub const BOUNDED: Self = Self {
        wrap_horizontal: false,
        wrap_vertical: false,
    };

    /// Wrapped on both axes (a torus)
    pub const TORUS: Self = Self {
        wrap_horizontal: true,
        wrap_vertical: true,
    };

    #[must_use]
    pub const fn new(wrap_horizontal: bool, wrap_vertical: bool) -> Self {
        Self {
            wrap_horizontal,
            wrap_vertical,
        }
    }
}

/// Construction parameters for a [`crate::FireAutomaton`].
///
/// # Example
///
/// ```
/// use forest_fire_core::FireConfig;
///
/// let config = FireConfig::new(64, 32, 0.59)
///     .with_wrap(true, false)
///     .with_ember_stages(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Grid width in cells (> 0)
    pub width: usize,
    /// Grid height in cells (> 0)
    pub height: usize,
    /// Probability in `[0, 1]` that a cell starts as `Tree`
    pub density: f64,
    pub wrap_horizontal: bool,
    pub wrap_vertical: bool,
    /// Cooling stages after `Burning`; 0 burns straight to `Burned`
    pub ember_stages: u8,
    /// Seed for the forest generator
    pub seed: u64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            density: 0.6,
            wrap_horizontal: false,
            wrap_vertical: false,
            ember_stages: DEFAULT_EMBER_STAGES,
            seed: 0,
        }
    }
}

impl FireConfig {
    /// Bounded grid with default ember stages and seed 0.
    #[must_use]
    pub fn new(width: usize, height: usize, density: f64) -> Self {
        Self {
            width,
            height,
            density,
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap_horizontal: bool, wrap_vertical: bool) -> Self {
        self.wrap_horizontal = wrap_horizontal;
        self.wrap_vertical = wrap_vertical;
        self
    }

    pub fn with_topology(self, topology: Topology) -> Self {
        self.with_wrap(topology.wrap_horizontal, topology.wrap_vertical)
    }

    pub fn with_ember_stages(mut self, ember_stages: u8) -> Self {
        self.ember_stages = ember_stages;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn topology(&self) -> Topology {
        Topology::new(self.wrap_horizontal, self.wrap_vertical)
    }

    /// Number of cells, or `None` if `width * height` overflows.
    #[must_use]
    pub const fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::Configuration`] when the width or height is zero,
    /// the cell count overflows, the density is not a finite value in
    /// `[0, 1]`, or `ember_stages` exceeds [`MAX_EMBER_STAGES`].
    pub fn validate(&self) -> FireResult<()> {
        if self.width == 0 {
            return Err(FireError::configuration("width", "must be positive, got 0"));
        }
        if self.height == 0 {
            return Err(FireError::configuration("height", "must be positive, got 0"));
        }
        if self.cell_count().is_none() {
            return Err(FireError::configuration(
                "width x height",
                format!("overflows usize ({} x {})", self.width, self.height),
            ));
        }
        if !self.density.is_finite() || !(0.0..=1.0).contains(&self.density) {
            return Err(FireError::configuration(
                "density",
                format!("must be within [0, 1], got {}", self.density),
            ));
        }
        if self.ember_stages > MAX_EMBER_STAGES {
            return Err(FireError::configuration(
                "ember_stages",
                format!(
                    "must be at most {MAX_EMBER_STAGES}, got {}",
                    self.ember_stages
                ),
            ));
        }
        Ok(())
    }
}
