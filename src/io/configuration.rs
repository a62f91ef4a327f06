//! Algorithm constants and runtime configuration defaults

use crate::math::convolution::BoundaryMode;

/// Side length of the square fill patch (must be odd for center-based operations)
pub const PATCH_SIZE: usize = 9;

/// Additive floor of the data term
///
/// Keeps every front priority strictly positive so flat fronts still make progress.
pub const DATA_TERM_EPSILON: f64 = 0.001;

/// Boundary handling used by the derivative and front-detection filters
pub const DEFAULT_BOUNDARY: BoundaryMode = BoundaryMode::Wrap;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Input discovery and output naming
/// Suffix identifying the mask that belongs to an input image
pub const MASK_SUFFIX: &str = "_mask";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_filled";
/// Suffix added to fill progression animations
pub const VISUALIZATION_SUFFIX: &str = "_fill";

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// How many frame delays the final frame is held for
pub const FINAL_FRAME_HOLD: u32 = 25;

/// Runtime parameters of the fill loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillConfig {
    /// Side length of the square patch (odd, at least 1)
    pub patch_size: usize,
    /// Additive floor of the data term (finite, non-negative)
    pub data_term_epsilon: f64,
    /// Boundary handling for the derivative and front-detection filters
    pub boundary: BoundaryMode,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            patch_size: PATCH_SIZE,
            data_term_epsilon: DATA_TERM_EPSILON,
            boundary: DEFAULT_BOUNDARY,
        }
    }
}

impl FillConfig {
    /// Half the patch side, i.e. the window radius around a center pixel
    pub const fn half_patch(&self) -> usize {
        self.patch_size / 2
    }

    /// Check that all parameters are usable
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The patch size is zero or even
    /// - The data term epsilon is negative or not finite
    pub fn validate(&self) -> crate::io::error::Result<()> {
        if self.patch_size == 0 || self.patch_size % 2 == 0 {
            return Err(crate::io::error::invalid_parameter(
                "patch_size",
                &self.patch_size,
                &"must be odd and at least 1",
            ));
        }
        if !self.data_term_epsilon.is_finite() || self.data_term_epsilon < 0.0 {
            return Err(crate::io::error::invalid_parameter(
                "data_term_epsilon",
                &self.data_term_epsilon,
                &"must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
