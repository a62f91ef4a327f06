use crate::io::error::{InpaintError, Result};
use crate::spatial::grid::{Canvas, PatchWindow};
use crate::spatial::region::RegionMask;
use rayon::prelude::*;

/// Best source patch found for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExemplarMatch {
    /// Exemplar patch center `[x, y]`
    pub center: [usize; 2],
    /// Summed squared RGB difference over the compared cells
    pub sse: u64,
}

impl ExemplarMatch {
    /// Whether `self` beats `other` under the sequential row-major scan
    ///
    /// Lower error wins; equal errors go to the candidate scanned first.
    fn beats(&self, other: &Self) -> bool {
        self.sse < other.sse
            || (self.sse == other.sse
                && (self.center[1], self.center[0]) < (other.center[1], other.center[0]))
    }
}

/// Coarse anti-self-copy guard
///
/// A candidate is rejected when it lies within `patch_size` of the target on
/// either axis, which is stricter than an exact overlap test.
pub const fn is_too_close(target: [usize; 2], candidate: [usize; 2], patch_size: usize) -> bool {
    target[0].abs_diff(candidate[0]) <= patch_size || target[1].abs_diff(candidate[1]) <= patch_size
}

/// Whether every cell of the patch around `center` is known
pub fn is_fully_known(region: &RegionMask, center: [usize; 2], half: usize) -> bool {
    let window = PatchWindow::new(center, half, region.width(), region.height());
    window.fits_inside() && window.cells().all(|cell| region.is_known(cell.x, cell.y))
}

/// Squared color error between the target patch and a candidate patch
///
/// Only offsets where both the target cell and the candidate cell are known
/// (and inside the image) contribute.
pub fn patch_sse(
    canvas: &Canvas,
    region: &RegionMask,
    target: [usize; 2],
    candidate: [usize; 2],
    half: usize,
) -> u64 {
    let window = PatchWindow::new(target, half, canvas.width(), canvas.height());
    let mut sse = 0u64;

    for cell in window.cells() {
        if !region.is_known(cell.x, cell.y) {
            continue;
        }
        let Some([sx, sy]) = cell.relative_to(candidate) else {
            continue;
        };
        if !region.is_known(sx, sy) {
            continue;
        }
        let (Some(t), Some(s)) = (canvas.pixel(cell.x, cell.y), canvas.pixel(sx, sy)) else {
            continue;
        };
        sse += t
            .iter()
            .zip(s.iter())
            .map(|(&a, &b)| u64::from(a.abs_diff(b)).pow(2))
            .sum::<u64>();
    }

    sse
}

/// Scan one candidate row left to right, keeping the first strictly-best match
fn best_in_row(
    canvas: &Canvas,
    region: &RegionMask,
    target: [usize; 2],
    patch_size: usize,
    y: usize,
) -> Option<ExemplarMatch> {
    let half = patch_size / 2;
    let mut best: Option<ExemplarMatch> = None;

    for x in half..canvas.width().saturating_sub(half) {
        let candidate = [x, y];
        if is_too_close(target, candidate, patch_size) {
            continue;
        }
        if !is_fully_known(region, candidate, half) {
            continue;
        }

        let found = ExemplarMatch {
            center: candidate,
            sse: patch_sse(canvas, region, target, candidate, half),
        };
        if best.is_none_or(|current| found.beats(&current)) {
            best = Some(found);
        }
    }

    best
}

/// Find the fully-known patch that best matches the known part of the target patch
///
/// Candidate rows are evaluated in parallel; the reduction reproduces the
/// sequential row-major tie-break exactly.
///
/// # Errors
///
/// Returns [`InpaintError::NoExemplarFound`] if no candidate is admissible. The
/// reported iteration is zero; callers attach their own.
pub fn find_exemplar(
    canvas: &Canvas,
    region: &RegionMask,
    target: [usize; 2],
    patch_size: usize,
) -> Result<ExemplarMatch> {
    let half = patch_size / 2;

    (half..canvas.height().saturating_sub(half))
        .into_par_iter()
        .filter_map(|y| best_in_row(canvas, region, target, patch_size, y))
        .reduce_with(|a, b| if b.beats(&a) { b } else { a })
        .ok_or(InpaintError::NoExemplarFound {
            iteration: 0,
            target,
        })
}
