//! Image directory layout, output naming, and image load/save.

use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::ActionError;

/// Directory holding input, watermark, and output images, relative to the
/// working directory.
pub const IMAGE_DIR: &str = "img";

/// Suffix inserted before the extension of watermarked outputs.
const OUTPUT_SUFFIX: &str = "-with-watermark";

/// JPEG quality used for every write.
pub const JPEG_QUALITY: u8 = 100;

/// Formats [`save_image`] can encode from an RGBA8 buffer.
const WRITABLE_FORMATS: [ImageFormat; 9] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Tiff,
    ImageFormat::Tga,
    ImageFormat::Bmp,
    ImageFormat::Ico,
    ImageFormat::Gif,
    ImageFormat::Pnm,
];

/// Derive the watermarked output filename from an input filename.
///
/// Splits on the last extension segment, so `a.b.jpg` becomes
/// `a.b-with-watermark.jpg`. A name without an extension gets the suffix
/// appended.
#[must_use]
pub fn derive_output_filename(file_name: &str) -> String {
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            let stem = stem.to_string_lossy();
            let ext = ext.to_string_lossy();
            let name = format!("{stem}{OUTPUT_SUFFIX}.{ext}");
            match path.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(parent) => parent.join(name).to_string_lossy().into_owned(),
                None => name,
            }
        }
        _ => format!("{file_name}{OUTPUT_SUFFIX}"),
    }
}

/// Resolve a filename inside the image directory rooted at `root`.
///
/// Subdirectories are allowed; absolute paths and `..` are not.
///
/// # Errors
///
/// Returns [`ActionError::OutsideImageDir`] if the name would leave `root`.
pub fn image_path(root: &Path, file_name: &str) -> Result<PathBuf, ActionError> {
    let name = Path::new(file_name);
    if name.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
        Ok(root.join(name))
    } else {
        Err(ActionError::OutsideImageDir { path: name.to_path_buf() })
    }
}

/// Fail with [`ActionError::MissingFile`] unless `path` is an existing file.
///
/// # Errors
///
/// Returns an error if the path does not exist or is not a file.
pub fn ensure_exists(path: &Path) -> Result<(), ActionError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ActionError::MissingFile { path: path.to_path_buf() })
    }
}

/// Decode an image file into an RGBA8 buffer.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be decoded.
pub fn load_image(path: &Path) -> Result<RgbaImage, ActionError> {
    ensure_exists(path)?;
    let img = image::open(path).map_err(|e| ActionError::decode(path, e))?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded image");
    Ok(img.into_rgba8())
}

/// Format that [`save_image`] will use for `path`.
///
/// # Errors
///
/// Returns [`ActionError::UnsupportedFormat`] if the extension is unknown or
/// names a format we do not write.
pub fn output_format(path: &Path) -> Result<ImageFormat, ActionError> {
    ImageFormat::from_path(path)
        .ok()
        .filter(|format| WRITABLE_FORMATS.contains(format))
        .ok_or_else(|| ActionError::UnsupportedFormat { path: path.to_path_buf() })
}

/// Encode an RGBA8 buffer to `path`, picking the format from the extension.
///
/// JPEG is written at [`JPEG_QUALITY`] with alpha dropped; formats that
/// carry alpha keep it. The image is encoded in memory first, so a failed
/// encode leaves an existing file untouched.
///
/// # Errors
///
/// Returns an error if the extension is unsupported or the write fails.
pub fn save_image(img: RgbaImage, path: &Path) -> Result<(), ActionError> {
    let format = output_format(path)?;

    let img = DynamicImage::ImageRgba8(img);
    let mut bytes = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
        }
        ImageFormat::Pnm => DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut bytes, format),
        _ => img.write_to(&mut bytes, format),
    }
    .map_err(|e| ActionError::encode(path, e))?;

    std::fs::write(path, bytes.into_inner())
        .map_err(|e| ActionError::encode(path, image::ImageError::IoError(e)))?;

    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}
