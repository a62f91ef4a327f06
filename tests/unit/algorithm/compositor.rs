//! Tests for patch copying and field updates

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use regionfill::algorithm::compositor::composite_patch;
    use regionfill::io::configuration::FillConfig;
    use regionfill::spatial::state::FillState;

    fn gradient_image() -> RgbImage {
        RgbImage::from_fn(10, 10, |x, y| Rgb([x as u8 * 20, y as u8 * 20, 90]))
    }

    fn state_with_holes(holes: &[[u32; 2]]) -> FillState {
        let mask = RgbImage::from_fn(10, 10, |x, y| {
            if holes.contains(&[x, y]) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let Ok(state) = FillState::initialize(&gradient_image(), &mask, &FillConfig::default())
        else {
            unreachable!("valid input rejected");
        };
        state
    }

    // Tests that only hole cells take exemplar colors
    // Verified by overwriting known cells too
    #[test]
    fn test_composite_fills_holes_only() {
        let mut state = state_with_holes(&[[5, 5]]);

        let newly_known = composite_patch(&mut state, [5, 5], [2, 2], 0.5, 1);

        assert_eq!(newly_known, 1);
        assert_eq!(state.canvas.pixel(5, 5), Some([40, 40, 90]));
        assert_eq!(state.canvas.pixel(4, 4), Some([80, 80, 90]));
        assert_eq!(state.region.hole_count(), 0);
    }

    // Tests confidence overwrite across the whole patch
    // Verified by updating hole cells only
    #[test]
    fn test_composite_overwrites_confidence() {
        let mut state = state_with_holes(&[[5, 5]]);

        composite_patch(&mut state, [5, 5], [2, 2], 0.5, 1);

        for y in 4..=6 {
            for x in 4..=6 {
                assert!((state.confidence.get(x, y) - 0.5).abs() < f64::EPSILON);
            }
        }
        assert!((state.confidence.get(3, 5) - 1.0).abs() < f64::EPSILON);
    }

    // Tests that isophotes follow the copied content
    // Verified by recomputing instead of copying
    #[test]
    fn test_composite_copies_isophotes() {
        let mut state = state_with_holes(&[[5, 5]]);
        state.isophotes.set(1, 1, [0.6, 0.8]);

        composite_patch(&mut state, [5, 5], [2, 2], 0.5, 1);

        assert_eq!(state.isophotes.get(4, 4), [0.6, 0.8]);
    }

    // Tests clipping at the image corner
    // Verified by clipping only the right and bottom edges
    #[test]
    fn test_composite_clips_at_edges() {
        let mut state = state_with_holes(&[[0, 0], [9, 9]]);

        let newly_known = composite_patch(&mut state, [0, 0], [5, 5], 0.25, 1);
        assert_eq!(newly_known, 1);
        assert_eq!(state.canvas.pixel(0, 0), Some([100, 100, 90]));
        assert!((state.confidence.get(1, 1) - 0.25).abs() < f64::EPSILON);
        assert!((state.confidence.get(2, 2) - 1.0).abs() < f64::EPSILON);

        let newly_known = composite_patch(&mut state, [9, 9], [5, 5], 0.25, 1);
        assert_eq!(newly_known, 1);
        assert_eq!(state.canvas.pixel(9, 9), Some([100, 100, 90]));
        assert_eq!(state.region.hole_count(), 0);
    }

    // Tests that a later patch recolors cells an earlier patch filled
    // Verified by copying color into hole cells only
    #[test]
    fn test_composite_overlapping_patches() {
        let mut state = state_with_holes(&[[4, 5], [5, 5], [6, 5]]);
        state.isophotes.set(1, 7, [0.6, 0.8]);

        let newly_known = composite_patch(&mut state, [4, 5], [2, 2], 0.5, 1);
        assert_eq!(newly_known, 2);
        assert_eq!(state.canvas.pixel(4, 5), Some([40, 40, 90]));
        assert_eq!(state.canvas.pixel(5, 5), Some([60, 40, 90]));

        let newly_known = composite_patch(&mut state, [6, 5], [2, 7], 0.25, 1);
        assert_eq!(newly_known, 1);
        assert_eq!(state.canvas.pixel(6, 5), Some([40, 140, 90]));
        assert_eq!(state.canvas.pixel(5, 5), Some([20, 140, 90]));
        assert_eq!(state.isophotes.get(5, 5), [0.6, 0.8]);

        // Source cells inside the second window keep their bytes
        assert_eq!(state.canvas.pixel(5, 4), Some([100, 80, 90]));
        assert_eq!(state.canvas.pixel(7, 6), Some([140, 120, 90]));
        assert_eq!(state.region.hole_count(), 0);
    }
}
