//! Odd-sized 2D filtering with selectable boundary handling
//!
//! Kernels are applied as correlation: the weight at kernel row `i`, column `j`
//! multiplies the input sample at `(row + i - radius, col + j - radius)`.
//! Out-of-range indices are resolved by the chosen [`BoundaryMode`].

use ndarray::Array2;
use num_traits::ToPrimitive;

/// How samples outside the input are resolved
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryMode {
    /// Toroidal wrap: an index past one edge reads from the opposite edge
    #[default]
    Wrap,
    /// Replicate the nearest edge sample
    Clamp,
    /// Mirror about the edge sample without repeating it
    Reflect,
}

impl BoundaryMode {
    /// Map a possibly out-of-range index onto `0..len`
    ///
    /// Returns `None` only when `len` is zero.
    pub fn resolve(self, index: i64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let last = len as i64 - 1;
        let resolved = match self {
            Self::Wrap => index.rem_euclid(len as i64),
            Self::Clamp => index.clamp(0, last),
            Self::Reflect => {
                if last == 0 {
                    0
                } else {
                    let period = 2 * last;
                    let folded = index.rem_euclid(period);
                    if folded > last {
                        period - folded
                    } else {
                        folded
                    }
                }
            }
        };
        Some(resolved as usize)
    }
}

/// Square filter kernel with odd side length
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from row-major weights
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `size` is zero or even
    /// - `weights` does not hold exactly `size * size` values
    pub fn new(size: usize, weights: Vec<f64>) -> crate::io::error::Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(crate::io::error::invalid_parameter(
                "kernel_size",
                &size,
                &"kernel side must be odd",
            ));
        }
        if weights.len() != size * size {
            return Err(crate::io::error::invalid_parameter(
                "kernel_weights",
                &weights.len(),
                &format!("expected {} weights for a {size}x{size} kernel", size * size),
            ));
        }
        Ok(Self { size, weights })
    }

    /// Build a 3x3 kernel from its rows
    pub fn from_3x3(rows: [[f64; 3]; 3]) -> Self {
        Self {
            size: 3,
            weights: rows.iter().flatten().copied().collect(),
        }
    }

    /// Side length
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge
    pub const fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at kernel row `i`, column `j` (zero outside the kernel)
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        if i >= self.size || j >= self.size {
            return 0.0;
        }
        self.weights.get(i * self.size + j).copied().unwrap_or(0.0)
    }
}

/// Filter `input` with `kernel`, producing a same-size float image
///
/// Any numeric sample type is accepted; samples that cannot be represented
/// as `f64` read as zero.
pub fn convolve<T>(input: &Array2<T>, kernel: &Kernel, boundary: BoundaryMode) -> Array2<f64>
where
    T: Copy + ToPrimitive,
{
    let (rows, cols) = input.dim();
    let radius = kernel.radius() as i64;

    Array2::from_shape_fn((rows, cols), |(row, col)| {
        let mut acc = 0.0;
        for i in 0..kernel.size() {
            let Some(src_row) = boundary.resolve(row as i64 + i as i64 - radius, rows) else {
                continue;
            };
            for j in 0..kernel.size() {
                let weight = kernel.weight(i, j);
                if weight == 0.0 {
                    continue;
                }
                let Some(src_col) = boundary.resolve(col as i64 + j as i64 - radius, cols) else {
                    continue;
                };
                let sample = input
                    .get([src_row, src_col])
                    .and_then(ToPrimitive::to_f64)
                    .unwrap_or(0.0);
                acc += weight * sample;
            }
        }
        acc
    })
}
