use crate::algorithm::front::FillFront;
use crate::io::configuration::FillConfig;
use crate::math::gradient::MaskNormals;
use crate::spatial::fields::{ConfidenceField, IsophoteField};
use crate::spatial::grid::PatchWindow;

/// Priority breakdown for one front pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityTerms {
    /// Front pixel `[x, y]`
    pub position: [usize; 2],
    /// Mean confidence of the surrounding patch
    pub confidence: f64,
    /// Strength of the structure meeting the front here
    pub data: f64,
    /// `confidence * data`
    pub priority: f64,
}

/// Mean confidence over the patch centered at `position`
///
/// Cells outside the image add nothing while the divisor stays
/// `patch_size²`, so pixels near the border are penalized.
pub fn confidence_term(
    confidence: &ConfidenceField,
    position: [usize; 2],
    patch_size: usize,
) -> f64 {
    let (height, width) = confidence.values().dim();
    let window = PatchWindow::new(position, patch_size / 2, width, height);
    confidence.window_mean(window)
}

/// `|isophote · normal| + epsilon`
pub fn data_term(isophote: [f64; 2], normal: [f64; 2], epsilon: f64) -> f64 {
    isophote[0].mul_add(normal[0], isophote[1] * normal[1]).abs() + epsilon
}

/// Score every front pixel, in front scan order
pub fn score_front(
    front: &FillFront,
    confidence: &ConfidenceField,
    isophotes: &IsophoteField,
    normals: &MaskNormals,
    config: &FillConfig,
) -> Vec<PriorityTerms> {
    front
        .positions()
        .iter()
        .map(|&position| {
            let [x, y] = position;
            let c = confidence_term(confidence, position, config.patch_size);
            let d = data_term(isophotes.get(x, y), normals.at(x, y), config.data_term_epsilon);
            PriorityTerms {
                position,
                confidence: c,
                data: d,
                priority: c * d,
            }
        })
        .collect()
}

/// Pick the highest-priority entry
///
/// Only a strictly greater priority displaces the current best, so ties keep
/// the earliest entry. When every priority is zero the first entry wins.
/// Returns `None` only for an empty slice.
pub fn select_target(scores: &[PriorityTerms]) -> Option<PriorityTerms> {
    let (first, rest) = scores.split_first()?;
    let mut best = *first;
    for terms in rest {
        if terms.priority > best.priority {
            best = *terms;
        }
    }
    Some(best)
}
