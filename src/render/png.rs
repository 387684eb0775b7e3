//! PNG output for composite images.

use std::path::Path;

use image::RgbImage;

use crate::error::{MosaicError, Result};

/// Write an image to a PNG file, creating parent directories as needed.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}
