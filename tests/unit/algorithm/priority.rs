//! Tests for the confidence, data and priority terms

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use regionfill::algorithm::front::FillFront;
    use regionfill::algorithm::priority::{
        PriorityTerms, confidence_term, data_term, score_front, select_target,
    };
    use regionfill::io::configuration::FillConfig;
    use regionfill::math::gradient::MaskNormals;
    use regionfill::spatial::fields::ConfidenceField;
    use regionfill::spatial::region::RegionMask;
    use regionfill::spatial::state::FillState;

    fn terms(x: usize, priority: f64) -> PriorityTerms {
        PriorityTerms {
            position: [x, 0],
            confidence: 1.0,
            data: priority,
            priority,
        }
    }

    // Tests the fixed divisor at image edges
    // Verified by dividing by the clipped area
    #[test]
    fn test_confidence_term_penalizes_edges() {
        let field = ConfidenceField::from_region(&RegionMask::all_known(5, 5));

        assert!((confidence_term(&field, [0, 0], 3) - 4.0 / 9.0).abs() < 1e-12);
        assert!((confidence_term(&field, [0, 2], 3) - 6.0 / 9.0).abs() < 1e-12);
        assert!((confidence_term(&field, [2, 2], 3) - 1.0).abs() < 1e-12);
    }

    // Tests the absolute dot product plus floor
    // Verified by dropping the absolute value
    #[test]
    fn test_data_term() {
        assert!((data_term([1.0, 0.0], [1.0, 0.0], 0.001) - 1.001).abs() < 1e-12);
        assert!((data_term([1.0, 0.0], [-1.0, 0.0], 0.001) - 1.001).abs() < 1e-12);
        assert!((data_term([0.0, 1.0], [1.0, 0.0], 0.001) - 0.001).abs() < 1e-12);
        assert!(data_term([0.0, 0.0], [0.0, 0.0], 0.0).abs() < f64::EPSILON);
    }

    // Tests that strictly greater priority wins and ties keep the first
    // Verified by using >= in the comparison
    #[test]
    fn test_select_target_tie_break() {
        assert_eq!(select_target(&[]), None);

        let tied = [terms(0, 0.5), terms(1, 0.5), terms(2, 0.1)];
        assert_eq!(select_target(&tied).map(|t| t.position), Some([0, 0]));

        let rising = [terms(0, 0.1), terms(1, 0.3), terms(2, 0.3)];
        assert_eq!(select_target(&rising).map(|t| t.position), Some([1, 0]));

        let zeros = [terms(4, 0.0), terms(5, 0.0)];
        assert_eq!(select_target(&zeros).map(|t| t.position), Some([4, 0]));
    }

    // Tests that every front pixel is scored in front order
    // Verified by adding the terms instead of multiplying
    #[test]
    fn test_score_front() {
        let image = RgbImage::from_fn(9, 9, |x, _| Rgb([x as u8 * 20, 0, 0]));
        let mask = RgbImage::from_fn(9, 9, |x, y| {
            if (3..=5).contains(&x) && (3..=5).contains(&y) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let config = FillConfig {
            patch_size: 3,
            ..FillConfig::default()
        };
        let Ok(state) = FillState::initialize(&image, &mask, &config) else {
            unreachable!("valid input rejected");
        };

        let front = FillFront::detect(&state.region, config.boundary);
        let normals = MaskNormals::compute(&state.region, config.boundary);
        let scores = score_front(
            &front,
            &state.confidence,
            &state.isophotes,
            &normals,
            &config,
        );

        assert_eq!(scores.len(), front.len());
        for (score, position) in scores.iter().zip(front.positions()) {
            assert_eq!(score.position, *position);
            assert!(score.data >= config.data_term_epsilon);
            assert!((score.priority - score.confidence * score.data).abs() < 1e-12);
        }

        // Corners of the hole see more known neighbors than edge midpoints
        let corner = scores.iter().find(|s| s.position == [3, 3]);
        let middle = scores.iter().find(|s| s.position == [3, 4]);
        assert!((corner.map(|s| s.confidence).unwrap_or(0.0) - 5.0 / 9.0).abs() < 1e-12);
        assert!((middle.map(|s| s.confidence).unwrap_or(0.0) - 3.0 / 9.0).abs() < 1e-12);
    }
}
