use std::path::PathBuf;

use thiserror::Error;

pub mod box_renderer;
pub mod image_reader;
pub mod image_writer;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to load image {path}: {message}")]
    ImageLoadFailed { path: PathBuf, message: String },

    #[error("failed to write image {path}: {message}")]
    ImageWriteFailed { path: PathBuf, message: String },
}
