//! Tests for the configuration document: defaults, parsing, validation and constants

#[cfg(test)]
mod tests {
    use pixelbloom::MosaicError;
    use pixelbloom::algorithm::anchors::Subject;
    use pixelbloom::io::configuration::{
        CONFIG_VERSION, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_PRESET_COUNT,
        MAX_INDIVIDUAL_PROGRESS_BARS, MAX_PIXEL_SIZE, MosaicConfig, VIEWER_MIN_FRAME_DELAY_MS,
        validate_brightness, validate_contrast,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Tests constants have sensible values
    // Verified by setting a zero frame delay
    #[test]
    fn test_constants() {
        assert!(VIEWER_MIN_FRAME_DELAY_MS > 0);
        assert!(MAX_INDIVIDUAL_PROGRESS_BARS > 0);
        assert!(MAX_PIXEL_SIZE > 1);
    }

    // Tests the default document is valid
    // Verified by defaulting to version 0
    #[test]
    fn test_default_valid() {
        let config = MosaicConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(
            (config.canvas().width, config.canvas().height),
            (DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
        );
    }

    // Tests a partial document fills the rest from defaults
    // Verified by removing the serde default attribute
    #[test]
    fn test_partial_document() {
        let config = MosaicConfig::from_json_str(
            r#"{
                "seed": 20260209,
                "palette": [[0, 0, 0], [255, 255, 255]],
                "fixed": { "subject": "jug", "bouquet": false },
                "ranges": { "flower_count": { "min": 10, "max": 20 } }
            }"#,
        )
        .expect("valid document");

        assert_eq!(config.seed, 20_260_209);
        assert_eq!(config.preset_count, DEFAULT_PRESET_COUNT);
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.fixed.subject, Some(Subject::Jug));
        assert_eq!(config.fixed.bouquet, Some(false));
        assert!(config.ranges.flower_count.is_some());
    }

    // Tests unknown keys, wrong versions and bad values are rejected
    // Verified by skipping validation after parsing
    #[test]
    fn test_rejections() {
        assert!(MosaicConfig::from_json_str(r#"{ "sead": 1 }"#).is_err());
        assert!(matches!(
            MosaicConfig::from_json_str(r#"{ "version": 2 }"#),
            Err(MosaicError::Configuration { .. })
        ));
        assert!(MosaicConfig::from_json_str(r#"{ "canvas_width": 0 }"#).is_err());
        assert!(MosaicConfig::from_json_str(r#"{ "min_coverage": 1.5 }"#).is_err());
        assert!(MosaicConfig::from_json_str(r#"{ "palette": [] }"#).is_err());
        assert!(MosaicConfig::from_json_str(r#"{ "fixed": { "contrast": 400 } }"#).is_err());
        assert!(MosaicConfig::from_json_str(r#"{ "fixed": { "pixel_size": 0 } }"#).is_err());
        assert!(MosaicConfig::from_json_str(r#"{ "fixed": { "brightness": 2147483647 } }"#).is_err());
        assert!(
            MosaicConfig::from_json_str(
                r#"{ "ranges": { "brightness": { "min": -1e12, "max": 0 } } }"#
            )
            .is_err()
        );
        assert!(
            MosaicConfig::from_json_str(r#"{ "ranges": { "aspect": { "min": 1, "max": 0 } } }"#)
                .is_err()
        );
    }

    // Tests contrast validation bounds
    // Verified by accepting NaN
    #[test]
    fn test_validate_contrast() {
        assert!(validate_contrast(255.0).is_ok());
        assert!(validate_contrast(-255.0).is_ok());
        assert!(validate_contrast(255.5).is_err());
        assert!(validate_contrast(f32::NAN).is_err());
    }

    // Tests brightness validation bounds
    // Verified by accepting offsets past the channel range
    #[test]
    fn test_validate_brightness() {
        assert!(validate_brightness(255.0).is_ok());
        assert!(validate_brightness(-255.0).is_ok());
        assert!(validate_brightness(256.0).is_err());
        assert!(validate_brightness(f64::from(i32::MIN)).is_err());
        assert!(validate_brightness(f64::NAN).is_err());
    }

    // Tests documents load from files and errors name the file
    // Verified by dropping the path from parse errors
    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "preset_count": 3 }}"#).expect("write config");
        let config = MosaicConfig::from_json_file(file.path()).expect("valid file");
        assert_eq!(config.preset_count, 3);

        let mut broken = NamedTempFile::new().expect("temp file");
        write!(broken, "{{ not json").expect("write config");
        let error = MosaicConfig::from_json_file(broken.path()).expect_err("invalid file");
        assert!(error.to_string().contains(&broken.path().display().to_string()));

        let missing = broken.path().with_extension("absent");
        assert!(matches!(
            MosaicConfig::from_json_file(&missing),
            Err(MosaicError::FileSystem { .. })
        ));
    }
}
