//! Tests for error types including source chaining, message formatting and path attachment

#[cfg(test)]
mod tests {
    use pixelbloom::MosaicError;
    use pixelbloom::io::error::{WithPath, configuration_error, invalid_parameter};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = MosaicError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(invalid_parameter("x", &1, &"bad").source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let message = invalid_parameter("pixel_size", &0, &"must be positive").to_string();
        assert!(message.contains("pixel_size"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests configuration and asset task errors name their origin
    // Verified by dropping the origin from the message
    #[test]
    fn test_configuration_and_task_errors() {
        let config = configuration_error(&"mosaic.json", &"unsupported version 9");
        assert!(config.to_string().contains("mosaic.json"));
        assert!(config.to_string().contains("unsupported version 9"));

        let task = MosaicError::AssetTask {
            path: PathBuf::from("rose.png"),
            reason: "loader thread panicked".to_string(),
        };
        assert!(task.to_string().contains("rose.png"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = MosaicError::ImageExport {
            path: PathBuf::from("/restricted/output.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/output.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests conversions fill in paths once attached
    // Verified by leaving the placeholder path in place
    #[test]
    fn test_with_path() {
        let failed: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let error = failed
            .with_path(Path::new("out/frame.png"))
            .expect_err("error preserved");
        assert!(error.to_string().contains("out/frame.png"));

        let json: std::result::Result<u32, serde_json::Error> = serde_json::from_str("{");
        let error = json
            .with_path(Path::new("mosaic.json"))
            .expect_err("error preserved");
        assert!(matches!(error, MosaicError::Configuration { ref origin, .. } if origin == "mosaic.json"));
    }
}
