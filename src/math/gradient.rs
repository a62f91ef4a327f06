//! Sobel derivatives, isophote directions and fill-front normals

use crate::math::convolution::{BoundaryMode, Kernel, convolve};
use crate::spatial::fields::IsophoteField;
use crate::spatial::grid::Canvas;
use crate::spatial::region::RegionMask;
use ndarray::Array2;

/// Horizontal derivative kernel
pub fn sobel_x() -> Kernel {
    Kernel::from_3x3([[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]])
}

/// Vertical derivative kernel
pub fn sobel_y() -> Kernel {
    Kernel::from_3x3([[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]])
}

/// Horizontal and vertical derivative images of one channel
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelGradient {
    /// Horizontal derivative
    pub gx: Array2<f64>,
    /// Vertical derivative
    pub gy: Array2<f64>,
}

/// Derivatives of each RGB channel of the canvas
pub fn channel_gradients(canvas: &Canvas, boundary: BoundaryMode) -> [ChannelGradient; 3] {
    let (kx, ky) = (sobel_x(), sobel_y());
    [0, 1, 2].map(|c| {
        let plane = canvas.channel(c);
        ChannelGradient {
            gx: convolve(&plane, &kx, boundary),
            gy: convolve(&plane, &ky, boundary),
        }
    })
}

/// Scale a vector to unit length, leaving the zero vector untouched
pub fn normalize(v: [f64; 2]) -> [f64; 2] {
    let magnitude = v[0].hypot(v[1]);
    if magnitude == 0.0 {
        v
    } else {
        [v[0] / magnitude, v[1] / magnitude]
    }
}

/// Isophote field of the canvas
///
/// The gradient of the channel sum (scaled to `[0, 1]` per channel) is
/// rotated by 90° and normalized. Flat pixels get the zero vector.
pub fn isophotes(canvas: &Canvas, boundary: BoundaryMode) -> IsophoteField {
    let [r, g, b] = channel_gradients(canvas, boundary);
    let scale = 3.0 * 255.0;
    let lum_x = (&r.gx + &g.gx + &b.gx) / scale;
    let lum_y = (&r.gy + &g.gy + &b.gy) / scale;

    IsophoteField::from_fn(canvas.height(), canvas.width(), |x, y| {
        let gx = lum_x.get([y, x]).copied().unwrap_or(0.0);
        let gy = lum_y.get([y, x]).copied().unwrap_or(0.0);
        normalize([-gy, gx])
    })
}

/// Gradient of the known/hole indicator, pointing from holes into known content
#[derive(Clone, Debug, PartialEq)]
pub struct MaskNormals {
    nx: Array2<f64>,
    ny: Array2<f64>,
}

impl MaskNormals {
    /// Filter the 0/1 region image with the derivative kernels
    pub fn compute(region: &RegionMask, boundary: BoundaryMode) -> Self {
        let binary = region.to_binary();
        Self {
            nx: convolve(&binary, &sobel_x(), boundary),
            ny: convolve(&binary, &sobel_y(), boundary),
        }
    }

    /// Raw (unnormalized) gradient at `(x, y)`
    pub fn raw(&self, x: usize, y: usize) -> [f64; 2] {
        [
            self.nx.get([y, x]).copied().unwrap_or(0.0),
            self.ny.get([y, x]).copied().unwrap_or(0.0),
        ]
    }

    /// Unit normal at `(x, y)`, or the zero vector where the gradient vanishes
    pub fn at(&self, x: usize, y: usize) -> [f64; 2] {
        normalize(self.raw(x, y))
    }
}
