//! Image action dispatcher.
//!
//! Each [`Action`] is one decode, one transform, and one encode. Edits
//! overwrite their source file; watermarks write a new derived file.

pub mod edit;
pub mod text;
pub mod watermark;

use std::path::PathBuf;

use tracing::info;

use crate::error::ActionError;
use crate::output::{load_image, output_format};

/// A fully resolved image operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Print text over the input and save to `output`.
    TextWatermark {
        /// Source image.
        input: PathBuf,
        /// Destination image.
        output: PathBuf,
        /// Text to print.
        text: String,
    },
    /// Composite another image over the input and save to `output`.
    ImageWatermark {
        /// Source image.
        input: PathBuf,
        /// Destination image.
        output: PathBuf,
        /// Overlay image.
        watermark: PathBuf,
    },
    /// Brighten `path` in place.
    Brightness {
        /// Image to rewrite.
        path: PathBuf,
        /// Signed delta.
        level: f32,
    },
    /// Change contrast of `path` in place.
    Contrast {
        /// Image to rewrite.
        path: PathBuf,
        /// Signed delta.
        value: f32,
    },
    /// Desaturate `path` in place.
    Greyscale {
        /// Image to rewrite.
        path: PathBuf,
    },
    /// Invert the colours of `path` in place.
    Invert {
        /// Image to rewrite.
        path: PathBuf,
    },
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TextWatermark { .. } => "text-watermark",
            Self::ImageWatermark { .. } => "image-watermark",
            Self::Brightness { .. } => "brightness",
            Self::Contrast { .. } => "contrast",
            Self::Greyscale { .. } => "greyscale",
            Self::Invert { .. } => "invert",
        }
    }

    /// Run the action on the current thread.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] raised by the underlying operation.
    pub fn apply(&self) -> Result<(), ActionError> {
        match self {
            Self::TextWatermark { input, output, text } => {
                watermark::apply_text_watermark(input, output, text)
            }
            Self::ImageWatermark { input, output, watermark } => {
                watermark::apply_image_watermark(input, output, watermark)
            }
            Self::Brightness { path, level } => {
                edit::edit_in_place(path, |img| edit::brighten(img, *level))
            }
            Self::Contrast { path, value } => {
                edit::edit_in_place(path, |img| edit::contrast(img, *value))
            }
            Self::Greyscale { path } => edit::edit_in_place(path, edit::greyscale),
            Self::Invert { path } => edit::edit_in_place(path, edit::invert),
        }
    }
}

/// Run `action` to completion on the blocking pool.
///
/// # Errors
///
/// Returns the action's error, or [`ActionError::Task`] if the worker
/// panicked or was cancelled.
pub async fn dispatch(action: Action) -> Result<(), ActionError> {
    let name = action.name();
    info!(action = name, "dispatching");
    tokio::task::spawn_blocking(move || action.apply())
        .await
        .map_err(|e| ActionError::Task(format!("{name}: {e}")))?
}

/// Decode every source and resolve the output format without writing.
///
/// Runs before any in-place edit, so a run that would abort on a missing or
/// unreadable file leaves the originals as they were.
///
/// # Errors
///
/// Returns the first source that is missing or cannot be decoded, or
/// [`ActionError::UnsupportedFormat`] for the output.
pub async fn preflight(sources: Vec<PathBuf>, output: PathBuf) -> Result<(), ActionError> {
    info!(sources = sources.len(), output = %output.display(), "checking preconditions");
    tokio::task::spawn_blocking(move || {
        for source in &sources {
            load_image(source)?;
        }
        output_format(&output).map(|_| ())
    })
    .await
    .map_err(|e| ActionError::Task(format!("preflight: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn names_are_stable() {
        let path = PathBuf::from("img/test.jpg");
        assert_eq!(Action::Greyscale { path: path.clone() }.name(), "greyscale");
        assert_eq!(Action::Invert { path: path.clone() }.name(), "invert");
        assert_eq!(Action::Brightness { path: path.clone(), level: 0.1 }.name(), "brightness");
        assert_eq!(Action::Contrast { path, value: 0.2 }.name(), "contrast");
    }

    #[tokio::test]
    async fn dispatch_greyscale_rewrites_file() {
        let dir = std::env::temp_dir().join("watermark_dispatch_grey_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.png");
        RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 255])).save(&path).unwrap();

        dispatch(Action::Greyscale { path: path.clone() }).await.unwrap();

        let img = image::open(&path).unwrap().into_rgba8();
        assert!(img.pixels().all(|p| p.0[0] == p.0[1] && p.0[1] == p.0[2]));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn preflight_rejects_undecodable_source() {
        let dir = std::env::temp_dir().join("watermark_preflight_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("test.png");
        let broken = dir.join("logo.png");
        RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255])).save(&good).unwrap();
        std::fs::write(&broken, b"not a png").unwrap();
        let output = dir.join("test-with-watermark.png");

        preflight(vec![good.clone()], output.clone()).await.unwrap();

        let err = preflight(vec![good.clone(), broken], output.clone()).await.unwrap_err();
        assert!(matches!(err, ActionError::Decode { .. }));

        let err = preflight(vec![good], dir.join("test-with-watermark.exr")).await.unwrap_err();
        assert!(matches!(err, ActionError::UnsupportedFormat { .. }));
        assert!(!output.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn dispatch_missing_file_is_an_error_not_a_panic() {
        let result = dispatch(Action::TextWatermark {
            input: PathBuf::from("/nonexistent/img/test.jpg"),
            output: PathBuf::from("/nonexistent/img/test-with-watermark.jpg"),
            text: "hello".into(),
        })
        .await;
        assert!(matches!(result, Err(ActionError::MissingFile { .. })));
    }
}
