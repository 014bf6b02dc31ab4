use std::fs;
use std::path::Path;

use crate::shared::frame::Frame;

use super::ImageError;

/// Writes a frame to an image file, creating parent directories as needed.
/// The format follows the destination extension.
pub fn save(path: &Path, frame: &Frame) -> Result<(), ImageError> {
    let write_err = |message: String| ImageError::ImageWriteFailed {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }

    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or_else(|| write_err("frame data does not match dimensions".to_string()))?;
    img.save(path).map_err(|e| write_err(e.to_string()))?;
    Ok(())
}
