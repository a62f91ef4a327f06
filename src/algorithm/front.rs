use crate::math::convolution::{BoundaryMode, Kernel, convolve};
use crate::spatial::region::RegionMask;

/// Eight-neighbor Laplacian used to find the hole boundary
pub fn front_kernel() -> Kernel {
    Kernel::from_3x3([[1.0, 1.0, 1.0], [1.0, -8.0, 1.0], [1.0, 1.0, 1.0]])
}

/// Current boundary between hole and known pixels
///
/// Positions are `[x, y]` in column-major order (x outer, y inner). That order
/// is the scan order used to break priority ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillFront {
    positions: Vec<[usize; 2]>,
}

impl FillFront {
    /// Rebuild the front from scratch
    ///
    /// A pixel is on the front when the Laplacian of the known indicator is
    /// strictly positive there, which selects hole pixels with at least one
    /// known neighbor under the given boundary handling.
    pub fn detect(region: &RegionMask, boundary: BoundaryMode) -> Self {
        let response = convolve(&region.to_binary(), &front_kernel(), boundary);

        let mut positions = Vec::new();
        for x in 0..region.width() {
            for y in 0..region.height() {
                if response.get([y, x]).is_some_and(|&v| v > 0.0) {
                    positions.push([x, y]);
                }
            }
        }

        Self { positions }
    }

    /// Front pixels in scan order
    pub const fn positions(&self) -> &[[usize; 2]] {
        self.positions.as_slice()
    }

    /// Number of front pixels
    pub const fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the hole is fully filled
    pub const fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
