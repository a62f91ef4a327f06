//! Tests for fill constants and runtime parameter validation

#[cfg(test)]
mod tests {
    use regionfill::io::configuration::{
        DATA_TERM_EPSILON, DEFAULT_BOUNDARY, FINAL_FRAME_HOLD, FillConfig, GIF_FRAME_DELAY_MS,
        MASK_SUFFIX, OUTPUT_SUFFIX, PATCH_SIZE, VIEWER_MIN_FRAME_DELAY_MS, VISUALIZATION_SUFFIX,
    };
    use regionfill::io::error::InpaintError;
    use regionfill::math::convolution::BoundaryMode;

    // Tests the default patch geometry
    // Verified by changing the patch size to an even number
    #[test]
    fn test_patch_size_default() {
        assert_eq!(PATCH_SIZE, 9);
        assert_eq!(PATCH_SIZE % 2, 1);
        assert_eq!(FillConfig::default().half_patch(), 4);
    }

    // Tests defaults flow into the runtime config
    // Verified by hardcoding a different epsilon in Default
    #[test]
    fn test_fill_config_default() {
        let config = FillConfig::default();
        assert_eq!(config.patch_size, PATCH_SIZE);
        assert!((config.data_term_epsilon - DATA_TERM_EPSILON).abs() < f64::EPSILON);
        assert_eq!(config.boundary, DEFAULT_BOUNDARY);
        assert_eq!(DEFAULT_BOUNDARY, BoundaryMode::Wrap);
        assert!(config.validate().is_ok());
    }

    // Tests rejection of unusable patch sizes
    // Verified by only rejecting zero
    #[test]
    fn test_validate_patch_size() {
        for patch_size in [0, 2, 8] {
            let config = FillConfig {
                patch_size,
                ..FillConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(InpaintError::InvalidParameter {
                    parameter: "patch_size",
                    ..
                })
            ));
        }

        let single = FillConfig {
            patch_size: 1,
            ..FillConfig::default()
        };
        assert!(single.validate().is_ok());
        assert_eq!(single.half_patch(), 0);
    }

    // Tests rejection of negative and non-finite epsilon
    // Verified by accepting NaN
    #[test]
    fn test_validate_epsilon() {
        for epsilon in [-0.5, f64::NAN, f64::INFINITY] {
            let config = FillConfig {
                data_term_epsilon: epsilon,
                ..FillConfig::default()
            };
            assert!(config.validate().is_err());
        }

        let zero = FillConfig {
            data_term_epsilon: 0.0,
            ..FillConfig::default()
        };
        assert!(zero.validate().is_ok());
    }

    // Tests file naming suffixes are distinct
    // Verified by reusing the output suffix for masks
    #[test]
    fn test_suffixes() {
        assert_eq!(MASK_SUFFIX, "_mask");
        assert_eq!(OUTPUT_SUFFIX, "_filled");
        assert_eq!(VISUALIZATION_SUFFIX, "_fill");
    }

    // Tests GIF timing relationships
    // Verified by setting the frame delay above the viewer minimum
    #[test]
    fn test_gif_timing() {
        assert!(GIF_FRAME_DELAY_MS < VIEWER_MIN_FRAME_DELAY_MS);
        assert!(FINAL_FRAME_HOLD > 1);
    }
}
