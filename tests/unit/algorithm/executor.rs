//! Tests for fill loop orchestration and the one-shot entry points

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use regionfill::algorithm::executor::{
        ExemplarInpainter, FillSession, InpaintMethod, IterationReport, inpaint,
    };
    use regionfill::io::configuration::FillConfig;
    use regionfill::io::error::InpaintError;

    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

    fn centered_hole_mask(size: u32, hole: u32) -> RgbImage {
        let start = (size - hole) / 2;
        let range = start..start + hole;
        RgbImage::from_fn(size, size, |x, y| {
            if range.contains(&x) && range.contains(&y) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    fn small_patch() -> FillConfig {
        FillConfig {
            patch_size: 3,
            ..FillConfig::default()
        }
    }

    // Tests a complete run on a uniform image
    // Verified by stopping after the first iteration
    #[test]
    fn test_session_runs_to_completion() {
        let image = RgbImage::from_pixel(20, 20, GRAY);
        let mask = centered_hole_mask(20, 4);

        let Ok(mut session) = FillSession::new(&image, &mask, small_patch()) else {
            unreachable!("valid input rejected");
        };
        assert_eq!(session.initial_hole_count(), 16);
        assert!(!session.is_complete());

        let Ok(iterations) = session.run() else {
            unreachable!("uniform image always has an exemplar");
        };
        assert!(iterations >= 2 && iterations <= 16);
        assert_eq!(session.iteration(), iterations);
        assert!(session.is_complete());
        assert_eq!(session.remaining_hole_count(), 0);
        assert_eq!(session.into_image().ok(), Some(image));
    }

    // Tests per-iteration reports and hole monotonicity
    // Verified by reporting the hole count before compositing
    #[test]
    fn test_iteration_reports() {
        let image = RgbImage::from_pixel(20, 20, GRAY);
        let mask = centered_hole_mask(20, 4);
        let Ok(mut session) = FillSession::new(&image, &mask, small_patch()) else {
            unreachable!("valid input rejected");
        };

        let mut reports: Vec<IterationReport> = Vec::new();
        let result = session.run_with(|report| reports.push(*report));
        assert!(result.is_ok());

        let mut previous = 16;
        for (index, report) in reports.iter().enumerate() {
            assert_eq!(report.iteration, index + 1);
            assert!(report.newly_known >= 1 && report.newly_known <= 9);
            assert_eq!(report.remaining, previous - report.newly_known);
            assert!(report.front_size > 0);
            previous = report.remaining;
        }
        assert_eq!(previous, 0);

        // Once finished, further iterations are no-ops
        assert!(matches!(session.run_iteration(), Ok(None)));
        assert!(matches!(session.execute_iteration(), Ok(false)));
    }

    // Tests that a mask without holes finishes immediately
    // Verified by running one iteration regardless of the front
    #[test]
    fn test_session_without_holes() {
        let image = RgbImage::from_fn(10, 10, |x, y| Rgb([x as u8, y as u8, 3]));
        let mask = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));

        let Ok(mut session) = FillSession::new(&image, &mask, FillConfig::default()) else {
            unreachable!("valid input rejected");
        };
        assert!(matches!(session.run(), Ok(0)));
        assert_eq!(session.into_image().ok(), Some(image));
    }

    // Tests that partial results are never handed out
    // Verified by returning the canvas unconditionally
    #[test]
    fn test_into_image_requires_completion() {
        let image = RgbImage::from_pixel(20, 20, GRAY);
        let mask = centered_hole_mask(20, 4);
        let Ok(mut session) = FillSession::new(&image, &mask, small_patch()) else {
            unreachable!("valid input rejected");
        };
        assert!(matches!(session.execute_iteration(), Ok(true)));

        let remaining = session.remaining_hole_count();
        assert!(matches!(
            session.into_image(),
            Err(InpaintError::FillIncomplete { remaining: r }) if r == remaining
        ));
    }

    // Tests parameter validation at construction
    // Verified by skipping config validation
    #[test]
    fn test_session_rejects_even_patch() {
        let image = RgbImage::from_pixel(20, 20, GRAY);
        let mask = centered_hole_mask(20, 4);
        let config = FillConfig {
            patch_size: 4,
            ..FillConfig::default()
        };

        assert!(matches!(
            FillSession::new(&image, &mask, config),
            Err(InpaintError::InvalidParameter {
                parameter: "patch_size",
                ..
            })
        ));
    }

    // Tests that search failures carry the iteration and target
    // Verified by dropping the error context
    #[test]
    fn test_no_exemplar_reports_iteration() {
        let image = RgbImage::from_pixel(20, 20, GRAY);
        let mask = centered_hole_mask(20, 4);

        let result = inpaint(&image, &mask, FillConfig::default());
        let Err(InpaintError::NoExemplarFound { iteration, target }) = result else {
            unreachable!("default patch cannot find an exemplar on a 20x20 image");
        };
        assert_eq!(iteration, 1);
        assert!((8..12).contains(&target[0]) && (8..12).contains(&target[1]));
    }

    // Tests the trait seam against the free function
    // Verified by ignoring the configured patch size
    #[test]
    fn test_inpainter_matches_inpaint() {
        let image = RgbImage::from_fn(24, 24, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 60]));
        let mask = centered_hole_mask(24, 2);
        let method = ExemplarInpainter::new(small_patch());

        let direct = inpaint(&image, &mask, small_patch()).ok();
        let via_trait = method.inpaint(&image, &mask).ok();
        assert!(direct.is_some());
        assert_eq!(direct, via_trait);
        assert_eq!(ExemplarInpainter::default().config, FillConfig::default());
    }

    // Tests visualization capture and export
    // Verified by recording placements before enabling capture
    #[test]
    fn test_visualization_export() {
        let image = RgbImage::from_pixel(20, 20, GRAY);
        let mask = centered_hole_mask(20, 4);
        let Ok(mut session) = FillSession::new(&image, &mask, small_patch()) else {
            unreachable!("valid input rejected");
        };

        let Ok(temp_dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        let gif_path = temp_dir.path().join("fill.gif");
        assert!(session.export_visualization(&gif_path).is_err());

        session.enable_visualization();
        let Ok(iterations) = session.run() else {
            unreachable!("uniform image always has an exemplar");
        };
        assert_eq!(
            session.visualization.as_ref().map(|viz| viz.placement_count()),
            Some(iterations)
        );
        assert!(session.export_visualization(&gif_path).is_ok());
        assert!(gif_path.exists());
    }
}
