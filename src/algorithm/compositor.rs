use crate::spatial::grid::PatchWindow;
use crate::spatial::state::FillState;

/// Copy the exemplar patch into the target patch
///
/// For every in-bounds target cell:
/// - every cell that was not source in the input mask receives the exemplar
///   color, including cells an earlier patch already filled
/// - the cell becomes known
/// - confidence is overwritten with `confidence`, known cells included
/// - the isophote is copied from the exemplar cell
///
/// Returns how many cells went from hole to known.
pub fn composite_patch(
    state: &mut FillState,
    target: [usize; 2],
    exemplar: [usize; 2],
    confidence: f64,
    half: usize,
) -> usize {
    let window = PatchWindow::new(target, half, state.width(), state.height());
    let mut newly_known = 0;

    for cell in window.cells() {
        let Some([sx, sy]) = cell.relative_to(exemplar) else {
            continue;
        };
        let Some(color) = state.canvas.pixel(sx, sy) else {
            continue;
        };

        if !state.is_source(cell.x, cell.y) {
            state.canvas.set_pixel(cell.x, cell.y, color);
        }
        if !state.region.is_known(cell.x, cell.y) {
            state.region.mark_known(cell.x, cell.y);
            newly_known += 1;
        }
        state.confidence.set(cell.x, cell.y, confidence);

        let direction = state.isophotes.get(sx, sy);
        state.isophotes.set(cell.x, cell.y, direction);
    }

    newly_known
}
