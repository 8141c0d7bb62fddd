//! Image decoding and PNG export

use std::path::Path;

use image::RgbaImage;

use crate::io::error::{MosaicError, Result};

/// Decode an image file into RGBA
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn open_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgba8())
}

/// Create the parent directory of `path` if it has one
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Save a rendered frame as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The image has a zero dimension
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(crate::io::error::invalid_parameter(
            "image",
            &format!("{}x{}", image.width(), image.height()),
            &"cannot export an empty image",
        ));
    }

    ensure_parent(output_path)?;

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
