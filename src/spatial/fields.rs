//! Per-pixel confidence and isophote fields

use crate::spatial::grid::PatchWindow;
use crate::spatial::region::RegionMask;
use ndarray::Array2;

/// How "known" each pixel's neighborhood is, in `[0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct ConfidenceField {
    values: Array2<f64>,
}

impl ConfidenceField {
    /// Known pixels start at 1, holes at 0
    pub fn from_region(region: &RegionMask) -> Self {
        Self {
            values: Array2::from_shape_fn((region.height(), region.width()), |(y, x)| {
                if region.is_known(x, y) { 1.0 } else { 0.0 }
            }),
        }
    }

    /// Confidence at `(x, y)`; zero outside the field
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values.get([y, x]).copied().unwrap_or(0.0)
    }

    /// Overwrite the confidence at `(x, y)`; writes outside the field are ignored
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if let Some(slot) = self.values.get_mut([y, x]) {
            *slot = value;
        }
    }

    /// Mean confidence over a window
    ///
    /// Cells clipped away at the image edges count as zero while the divisor
    /// stays the full window area, so edge pixels score lower.
    pub fn window_mean(&self, window: PatchWindow) -> f64 {
        let sum: f64 = window.cells().map(|cell| self.get(cell.x, cell.y)).sum();
        sum / window.full_area() as f64
    }

    /// Underlying `(height, width)` values
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Local structure direction at every pixel
///
/// Holds the 90°-rotated unit intensity gradient. Inside filled patches the
/// direction is copied from the exemplar rather than recomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct IsophoteField {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl IsophoteField {
    /// Build a `(height, width)` field from a per-pixel direction function of `(x, y)`
    pub fn from_fn<F>(height: usize, width: usize, direction: F) -> Self
    where
        F: Fn(usize, usize) -> [f64; 2],
    {
        let mut x = Array2::zeros((height, width));
        let mut y = Array2::zeros((height, width));
        for row in 0..height {
            for col in 0..width {
                let [dx, dy] = direction(col, row);
                if let Some(slot) = x.get_mut([row, col]) {
                    *slot = dx;
                }
                if let Some(slot) = y.get_mut([row, col]) {
                    *slot = dy;
                }
            }
        }
        Self { x, y }
    }

    /// Direction at `(x, y)`; zero vector outside the field
    pub fn get(&self, x: usize, y: usize) -> [f64; 2] {
        [
            self.x.get([y, x]).copied().unwrap_or(0.0),
            self.y.get([y, x]).copied().unwrap_or(0.0),
        ]
    }

    /// Overwrite the direction at `(x, y)`; writes outside the field are ignored
    pub fn set(&mut self, x: usize, y: usize, direction: [f64; 2]) {
        if let Some(slot) = self.x.get_mut([y, x]) {
            *slot = direction[0];
        }
        if let Some(slot) = self.y.get_mut([y, x]) {
            *slot = direction[1];
        }
    }
}
