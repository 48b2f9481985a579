use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaPickError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input missing or unreadable: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("No source image loaded")]
    NoImageLoaded,

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("EXIF error: {0}")]
    Exif(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Session is closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, MediaPickError>;
