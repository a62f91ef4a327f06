//! Known/hole classification of every pixel

use bitvec::prelude::*;
use image::{Rgb, RgbImage};
use ndarray::Array2;

/// Whether a mask pixel marks source (known) content
///
/// Pure black marks a hole; any other color is source.
pub const fn classify(mask_pixel: Rgb<u8>) -> bool {
    let [r, g, b] = mask_pixel.0;
    !(r == 0 && g == 0 && b == 0)
}

/// Per-pixel flag, `true` for known pixels
///
/// Stored row-major. Flags only ever move from hole to known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMask {
    known: BitVec,
    width: usize,
    height: usize,
}

impl RegionMask {
    /// Classify every pixel of a mask image
    pub fn from_mask(mask: &RgbImage) -> Self {
        let (width, height) = (mask.width() as usize, mask.height() as usize);
        let mut known = bitvec![0; width * height];
        for (x, y, pixel) in mask.enumerate_pixels() {
            known.set(y as usize * width + x as usize, classify(*pixel));
        }
        Self {
            known,
            width,
            height,
        }
    }

    /// Mask with every pixel known
    pub fn all_known(width: usize, height: usize) -> Self {
        Self {
            known: bitvec![1; width * height],
            width,
            height,
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` is known; out-of-range pixels read as holes
    pub fn is_known(&self, x: usize, y: usize) -> bool {
        x < self.width
            && y < self.height
            && self.known.get(y * self.width + x).as_deref() == Some(&true)
    }

    /// Mark `(x, y)` as known; out-of-range pixels are ignored
    pub fn mark_known(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.known.set(y * self.width + x, true);
        }
    }

    /// Number of known pixels
    pub fn known_count(&self) -> usize {
        self.known.count_ones()
    }

    /// Number of hole pixels
    pub fn hole_count(&self) -> usize {
        self.known.count_zeros()
    }

    /// Whether no pixel is known
    pub fn is_all_hole(&self) -> bool {
        self.known.not_any()
    }

    /// Snapshot of the flags in row-major order
    pub fn flags(&self) -> &BitSlice {
        &self.known
    }

    /// Render as a `(height, width)` plane of 1 (known) and 0 (hole)
    pub fn to_binary(&self) -> Array2<u8> {
        Array2::from_shape_fn((self.height, self.width), |(y, x)| {
            u8::from(self.is_known(x, y))
        })
    }
}
