//! Bitmap text rendering for text watermarks.
//!
//! Glyphs come from the 8x8 `font8x8` set, scaled up to roughly 32 px and
//! word-wrapped to the image width.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Native glyph edge in pixels.
const GLYPH_SIZE: u32 = 8;
/// Preferred integer scale (8 px * 4 = 32 px glyphs).
const PREFERRED_SCALE: u32 = 4;
/// Glyph colour.
const TEXT_COLOUR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Largest scale up to [`PREFERRED_SCALE`] at which one glyph fits in `width`.
#[must_use]
pub fn glyph_scale(width: u32) -> u32 {
    let mut scale = PREFERRED_SCALE;
    while scale > 1 && GLYPH_SIZE * scale > width {
        scale -= 1;
    }
    scale
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Explicit newlines are kept. Words longer than a line are split.
#[must_use]
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                let needed = if line_len == 0 { chunk.len() } else { line_len + 1 + chunk.len() };
                if needed > max_chars && line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.extend(chunk);
                line_len += chunk.len();
            }
        }
        lines.push(line);
    }
    lines
}

/// Print `text` centred on both axes over the whole image.
#[allow(clippy::cast_possible_wrap)]
pub fn draw_centered_text(img: &mut RgbaImage, text: &str) {
    let (width, height) = img.dimensions();
    let scale = glyph_scale(width);
    let cell = GLYPH_SIZE * scale;
    let max_chars = (width / cell).max(1) as usize;
    let lines = wrap_lines(text, max_chars);
    if lines.is_empty() {
        return;
    }

    let cell = i64::from(cell);
    let block_height = cell * lines.len() as i64;
    let top = (i64::from(height) - block_height) / 2;

    for (row, line) in lines.iter().enumerate() {
        let line_width = cell * line.chars().count() as i64;
        let left = (i64::from(width) - line_width) / 2;
        let y = top + cell * row as i64;
        for (col, ch) in line.chars().enumerate() {
            draw_glyph(img, left + cell * col as i64, y, ch, scale);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn draw_glyph(img: &mut RgbaImage, x: i64, y: i64, ch: char, scale: u32) {
    let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
        return;
    };
    let scale = i64::from(scale);
    let (width, height) = (i64::from(img.width()), i64::from(img.height()));

    for (row_idx, &row_bits) in glyph.iter().enumerate() {
        for col_idx in 0..GLYPH_SIZE {
            if (row_bits >> col_idx) & 1 == 0 {
                continue;
            }
            let px = x + i64::from(col_idx) * scale;
            let py = y + row_idx as i64 * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    let (tx, ty) = (px + sx, py + sy);
                    if (0..width).contains(&tx) && (0..height).contains(&ty) {
                        img.put_pixel(tx as u32, ty as u32, TEXT_COLOUR);
                    }
                }
            }
        }
    }
}
