//! Error types for the configuration and I/O boundary
//!
//! The mosaic core itself is total over its clamped inputs; these errors only
//! arise when reading configuration, validating presets, or writing output.

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all fallible operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load or decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or save a generated image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Configuration document could not be parsed or is unsupported
    Configuration {
        /// Where the configuration came from
        origin: String,
        /// Description of the failure
        reason: String,
    },

    /// An asset loading task ended without producing a result
    AssetTask {
        /// Path the task was loading
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Configuration { origin, reason } => {
                write!(f, "Invalid configuration in {origin}: {reason}")
            }
            Self::AssetTask { path, reason } => {
                write!(
                    f,
                    "Asset task for '{}' did not complete: {reason}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration {
            origin: "<json>".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Attaches the offending path to errors raised without one
pub trait WithPath<T> {
    /// Replace the placeholder path of an I/O or image error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MosaicError::ImageLoad { path: p, .. }
                | MosaicError::ImageExport { path: p, .. }
                | MosaicError::FileSystem { path: p, .. }
                | MosaicError::AssetTask { path: p, .. } => *p = path.to_path_buf(),
                MosaicError::Configuration { origin, .. } => {
                    *origin = path.display().to_string();
                }
                MosaicError::InvalidParameter { .. } => {}
            }
            error
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a configuration error
pub fn configuration_error(origin: &impl ToString, reason: &impl ToString) -> MosaicError {
    MosaicError::Configuration {
        origin: origin.to_string(),
        reason: reason.to_string(),
    }
}
