//! Mutable per-pixel state owned by a fill run

use crate::io::configuration::FillConfig;
use crate::io::error::{InpaintError, Result, invalid_input};
use crate::math::gradient::isophotes;
use crate::spatial::fields::{ConfidenceField, IsophoteField};
use crate::spatial::grid::Canvas;
use crate::spatial::region::RegionMask;
use bitvec::vec::BitVec;
use image::RgbImage;

/// The four coupled fields the fill loop mutates
///
/// Created once from an image and its mask; the input image is copied, never
/// borrowed, so the caller's pixels stay untouched.
#[derive(Debug, Clone)]
pub struct FillState {
    /// Working pixels
    pub canvas: Canvas,
    /// Known/hole flags
    pub region: RegionMask,
    /// Per-pixel confidence
    pub confidence: ConfidenceField,
    /// Per-pixel structure direction
    pub isophotes: IsophoteField,
    /// Pixels the mask marked as source, fixed for the whole run
    source: BitVec,
}

impl FillState {
    /// Validate the inputs and derive every field
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Image and mask dimensions differ
    /// - The image has zero area
    /// - The mask marks every pixel as hole
    pub fn initialize(image: &RgbImage, mask: &RgbImage, config: &FillConfig) -> Result<Self> {
        if image.dimensions() != mask.dimensions() {
            return Err(InpaintError::DimensionMismatch {
                image: image.dimensions(),
                mask: mask.dimensions(),
            });
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(invalid_input(&format!(
                "image has zero area ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let region = RegionMask::from_mask(mask);
        if region.is_all_hole() {
            return Err(invalid_input(
                &"mask marks the whole image as hole, nothing to copy from",
            ));
        }

        let source = region.flags().to_bitvec();
        let canvas = Canvas::from_image(image);
        let confidence = ConfidenceField::from_region(&region);
        let isophotes = isophotes(&canvas, config.boundary);

        Ok(Self {
            canvas,
            region,
            confidence,
            isophotes,
            source,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    /// Whether `(x, y)` was source content in the input mask
    ///
    /// Unlike the region mask this never changes as patches are copied in.
    pub fn is_source(&self, x: usize, y: usize) -> bool {
        x < self.width()
            && y < self.height()
            && self.source.get(y * self.width() + x).as_deref() == Some(&true)
    }
}
