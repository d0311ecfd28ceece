//! Challenge character selection and drawing.

use crate::assets::FontFace;
use crate::config::options::MAX_DIMENSION;
use crate::config::{CaptchaError, Result, Settings};
use crate::core::RandomSource;
use crate::render::blend_mask;
use image::{GrayImage, Luma, Rgb, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Uppercase consonants without easily confused shapes (no vowels, no `V`).
pub const LETTERS: [char; 20] = [
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'W', 'X', 'Y',
    'Z',
];

/// Digits without zero.
pub const NUMBERS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Glyph alpha is `255 - below(ALPHA_JITTER)`.
const ALPHA_JITTER: u32 = 65;
/// Rotation is `(below(ROTATION_STEPS) - 32) / ROTATION_DIVISOR` radians (about ±4.8°).
const ROTATION_STEPS: u32 = 65;
const ROTATION_DIVISOR: f64 = 384.0;

struct GlyphDraw {
    symbol: char,
    center_x: f64,
    center_y: f64,
    rotation: f64,
    alpha: u8,
}

/// Picks one symbol: a letter with probability `letter_ratio`, otherwise a digit.
pub fn pick_symbol(letter_ratio: f64, rng: &mut RandomSource) -> char {
    if rng.float64() < letter_ratio {
        LETTERS[rng.below(LETTERS.len() as u32) as usize]
    } else {
        NUMBERS[rng.below(NUMBERS.len() as u32) as usize]
    }
}

/// Returns true if `symbol` belongs to either challenge alphabet.
#[must_use]
pub fn is_challenge_symbol(symbol: char) -> bool {
    LETTERS.contains(&symbol) || NUMBERS.contains(&symbol)
}

/// Draws `settings.character_count` glyphs left to right and returns them as
/// the challenge value.
///
/// # Errors
///
/// Returns `CaptchaError::FontLoad` if the face cannot outline a symbol and
/// `CaptchaError::InvalidOptions` if a glyph is larger than `MAX_DIMENSION`.
pub fn draw(
    canvas: &mut RgbaImage,
    settings: &Settings,
    face: &FontFace,
    rng: &mut RandomSource,
) -> Result<String> {
    let count = settings.character_count;
    let slot_width = f64::from(settings.width) / count as f64;
    let half_height = f64::from(settings.height) / 2.0;

    let mut value = String::with_capacity(count);

    for i in 0..count {
        let symbol = pick_symbol(settings.letter_ratio, rng);
        value.push(symbol);

        let alpha = u8::try_from(255 - rng.below(ALPHA_JITTER)).unwrap_or(u8::MAX);
        let rotation =
            (f64::from(rng.below(ROTATION_STEPS)) - f64::from(ROTATION_STEPS / 2)) / ROTATION_DIVISOR;

        let glyph = GlyphDraw {
            symbol,
            center_x: slot_width * (i as f64 + 0.5),
            center_y: half_height,
            rotation,
            alpha,
        };
        draw_glyph(canvas, face, &glyph, settings.text_color)?;
    }

    Ok(value)
}

/// Draws one glyph as if the canvas were rotated about its center by
/// `glyph.rotation` for this glyph only.
fn draw_glyph(
    canvas: &mut RgbaImage,
    face: &FontFace,
    glyph: &GlyphDraw,
    color: Rgb<u8>,
) -> Result<()> {
    let outlined = face.outline(glyph.symbol)?;
    let bounds = outlined.px_bounds();
    let (glyph_w, glyph_h) = (bounds.width(), bounds.height());

    // Square scratch large enough that rotation never clips the glyph.
    let side = scratch_side(glyph_w, glyph_h).ok_or_else(|| {
        CaptchaError::InvalidOptions(format!(
            "glyph '{}' of {glyph_w}x{glyph_h}px exceeds the {MAX_DIMENSION}px limit",
            glyph.symbol
        ))
    })?;
    let offset_x = ((side as f32 - glyph_w) / 2.0).floor() as u32;
    let offset_y = ((side as f32 - glyph_h) / 2.0).floor() as u32;

    let mut mask = GrayImage::new(side, side);
    outlined.draw(|x, y, coverage| {
        let (px, py) = (x + offset_x, y + offset_y);
        if px < side && py < side {
            let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            mask.put_pixel(px, py, Luma([value]));
        }
    });

    let rotated = rotate_about_center(
        &mask,
        glyph.rotation as f32,
        Interpolation::Bilinear,
        Luma([0]),
    );

    let (width, height) = canvas.dimensions();
    let (half_w, half_h) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let (dx, dy) = (glyph.center_x - half_w, glyph.center_y - half_h);
    let (sin, cos) = glyph.rotation.sin_cos();
    let center_x = half_w + dx * cos - dy * sin;
    let center_y = half_h + dx * sin + dy * cos;

    let half_side = f64::from(side) / 2.0;
    let origin = (
        (center_x - half_side).round() as i64,
        (center_y - half_side).round() as i64,
    );
    blend_mask(canvas, &rotated, origin, color, glyph.alpha);

    Ok(())
}

/// Side of a square that holds the glyph at any rotation, with a one pixel
/// margin. `None` if that square would exceed `MAX_DIMENSION`.
fn scratch_side(glyph_w: f32, glyph_h: f32) -> Option<u32> {
    let diagonal = glyph_w.hypot(glyph_h).ceil();
    if !diagonal.is_finite() || diagonal < 0.0 || diagonal > MAX_DIMENSION as f32 {
        return None;
    }
    (diagonal as u32).checked_add(2)
}
