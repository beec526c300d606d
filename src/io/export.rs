//! Writing pattern text and preview rasters to disk

use crate::io::error::{HatchError, Result, WithPath};
use image::RgbImage;
use std::path::Path;

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")
        }
        _ => Ok(()),
    }
}

/// Write `.pat` text, creating parent directories as needed
///
/// # Errors
///
/// Returns [`HatchError::FileSystem`] if the directory or file cannot be written
pub fn write_pattern(text: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).with_path(path, "write pattern")
}

/// Save a preview raster as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns [`HatchError::FileSystem`] if the directory cannot be created, or
/// [`HatchError::ImageExport`] if encoding or writing the image fails
pub fn export_preview_png(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| HatchError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}
