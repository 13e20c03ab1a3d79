//! Error types for the cartoonify library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the cartoonify library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Adaptive thresholding needs an odd neighbourhood larger than one pixel.
    #[error("block size must be an odd integer greater than 1, got {0}")]
    InvalidBlockSize(u32),

    /// A form field did not hold an integer.
    #[error("{field} must be an integer, got {value:?}")]
    InvalidParameter { field: &'static str, value: String },

    /// The decoded image has a zero dimension.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// A masking step ran before any step produced a mask.
    #[error("step {step} needs an edge mask but none was produced")]
    MissingMask { step: String },

    /// The debug output directory already has files in it.
    #[error("debug directory is not empty: {}", .0.display())]
    DebugDirNotEmpty(PathBuf),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
