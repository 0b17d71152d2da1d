//! Pre-watermark photo edits. Each one rewrites the source file in place.

use std::path::Path;

use image::{imageops, RgbaImage};

use crate::error::ActionError;
use crate::output::{load_image, save_image};

/// Apply a signed brightness delta in `[-1, 1]`.
///
/// Positive values move each channel toward white, negative toward black.
pub fn brighten(img: &mut RgbaImage, delta: f32) {
    let delta = delta.clamp(-1.0, 1.0);
    map_colour_channels(img, |c| {
        if delta < 0.0 {
            c * (1.0 + delta)
        } else {
            c + (255.0 - c) * delta
        }
    });
}

/// Apply a signed contrast delta in `(-1, 1)`.
pub fn contrast(img: &mut RgbaImage, delta: f32) {
    let delta = delta.clamp(-0.99, 0.99);
    let factor = (delta + 1.0) / (1.0 - delta);
    map_colour_channels(img, |c| (factor * (c - 127.0) + 127.0).floor());
}

/// Replace each pixel's colour with its Rec. 709 luminance.
pub fn greyscale(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let luma = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
        let luma = to_channel(luma);
        pixel.0[0] = luma;
        pixel.0[1] = luma;
        pixel.0[2] = luma;
    }
}

/// Invert colour channels; alpha is left alone.
pub fn invert(img: &mut RgbaImage) {
    imageops::invert(img);
}

fn map_colour_channels(img: &mut RgbaImage, f: impl Fn(f32) -> f32) {
    for pixel in img.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = to_channel(f(f32::from(*channel)));
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Load `path`, apply `edit`, and write the result back over `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, cannot be decoded, or cannot be
/// written back.
pub fn edit_in_place(path: &Path, edit: impl FnOnce(&mut RgbaImage)) -> Result<(), ActionError> {
    let mut img = load_image(path)?;
    edit(&mut img);
    save_image(img, path)
}
