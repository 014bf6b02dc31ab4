use std::path::Path;

use crate::shared::frame::Frame;

use super::ImageError;

/// Loads an image file as an RGB frame using the `image` crate.
pub fn load_rgb(path: &Path) -> Result<Frame, ImageError> {
    let img = image::open(path)
        .map_err(|e| ImageError::ImageLoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3))
}
