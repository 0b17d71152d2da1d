//! Text and image watermarks. Both write a new file and leave the input alone.

use std::path::Path;

use image::{imageops, RgbaImage};
use tracing::debug;

use super::text::draw_centered_text;
use crate::error::ActionError;
use crate::output::{load_image, save_image};

/// Opacity applied to the watermark image before compositing.
pub const WATERMARK_OPACITY: f32 = 0.5;

/// Print `text` centred over `input` and write the result to `output`.
///
/// # Errors
///
/// Returns an error if the input is missing or cannot be decoded, or the
/// output cannot be written.
pub fn apply_text_watermark(input: &Path, output: &Path, text: &str) -> Result<(), ActionError> {
    let mut img = load_image(input)?;
    draw_centered_text(&mut img, text);
    save_image(img, output)
}

/// Composite `watermark` centred over `input` at [`WATERMARK_OPACITY`] and
/// write the result to `output`.
///
/// # Errors
///
/// Returns an error if either source is missing or cannot be decoded, or the
/// output cannot be written.
pub fn apply_image_watermark(
    input: &Path,
    output: &Path,
    watermark: &Path,
) -> Result<(), ActionError> {
    let mut base = load_image(input)?;
    let mut overlay = load_image(watermark)?;
    composite_centered(&mut base, &mut overlay, WATERMARK_OPACITY);
    save_image(base, output)
}

/// Blend `overlay` onto the centre of `base` with source-over, after scaling
/// the overlay's alpha by `opacity`.
pub fn composite_centered(base: &mut RgbaImage, overlay: &mut RgbaImage, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    for pixel in overlay.pixels_mut() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let alpha = (f32::from(pixel.0[3]) * opacity).round() as u8;
        pixel.0[3] = alpha;
    }

    let (x, y) = centre_offset(base.dimensions(), overlay.dimensions());
    debug!(x, y, opacity, "compositing watermark");
    imageops::overlay(base, &*overlay, x, y);
}

/// Top-left position that centres an `inner` box inside an `outer` box.
/// Negative when the inner box is larger.
#[must_use]
pub fn centre_offset(outer: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    let x = (i64::from(outer.0) - i64::from(inner.0)) / 2;
    let y = (i64::from(outer.1) - i64::from(inner.1)) / 2;
    (x, y)
}
