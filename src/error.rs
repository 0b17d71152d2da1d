//! Error types for watermark-manager.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The prompt channel failed (terminal closed, cassette exhausted).
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Cassette could not be loaded or written.
    #[error("Cassette error: {0}")]
    Cassette(String),
}

/// Errors from a single image action. A run that hits one of these is
/// aborted, but the application keeps going.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required file is not on disk.
    #[error("file not found: {}", path.display())]
    MissingFile {
        /// The missing path.
        path: PathBuf,
    },

    /// The filename points outside the image directory.
    #[error("path is outside the image directory: {}", path.display())]
    OutsideImageDir {
        /// The rejected filename.
        path: PathBuf,
    },

    /// The file exists but could not be decoded as an image.
    #[error("failed to load image from {}: {source}", path.display())]
    Decode {
        /// The image path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The result could not be written.
    #[error("failed to save image to {}: {source}", path.display())]
    Encode {
        /// The destination path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The output extension does not map to a format we can write.
    #[error("unsupported image format: {}", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// The blocking worker running the action did not complete.
    #[error("image task failed: {0}")]
    Task(String),
}

impl ActionError {
    /// Classify a codec error raised while reading `path`.
    pub(crate) fn decode(path: &std::path::Path, source: image::ImageError) -> Self {
        match source {
            image::ImageError::Unsupported(_) => Self::UnsupportedFormat { path: path.into() },
            image::ImageError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::MissingFile { path: path.into() }
            }
            source => Self::Decode { path: path.into(), source },
        }
    }

    /// Classify a codec error raised while writing `path`.
    pub(crate) fn encode(path: &std::path::Path, source: image::ImageError) -> Self {
        match source {
            image::ImageError::Unsupported(_) => Self::UnsupportedFormat { path: path.into() },
            source => Self::Encode { path: path.into(), source },
        }
    }
}
