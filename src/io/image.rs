//! Image and mask loading and PNG export

use crate::io::error::{InpaintError, Result};
use image::RgbImage;
use std::path::Path;

/// Load an image from disk as 8-bit RGB
///
/// Alpha, if present, is dropped.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - The file is not a supported image format
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| InpaintError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Save an image, creating the parent directory if needed
///
/// The format is chosen from the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_image(image: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| InpaintError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| InpaintError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
