//! Conversion of decoded RGB scanlines into the requested pixel layout.
//!
//! The engine hands back interleaved RGB (or luma, for grayscale output).
//! Every other layout is derived here.

use rgb::{FromSlice, RGB8};

use crate::PixelFormat;

/// Padding byte written into the X channel of RGBX/BGRX output.
pub(crate) const PAD: u8 = 0xFF;

/// Convert a packed RGB buffer into `target`.
pub(crate) fn from_rgb(rgb: Vec<u8>, target: PixelFormat) -> Vec<u8> {
    let pixels: &[RGB8] = rgb.as_rgb();
    match target {
        PixelFormat::Rgb => rgb,
        PixelFormat::Bgr => pixels.iter().flat_map(|p| [p.b, p.g, p.r]).collect(),
        PixelFormat::Rgbx => pixels.iter().flat_map(|p| [p.r, p.g, p.b, PAD]).collect(),
        PixelFormat::Bgrx => pixels.iter().flat_map(|p| [p.b, p.g, p.r, PAD]).collect(),
        PixelFormat::YCbCr => pixels.iter().flat_map(|&p| ycbcr(p)).collect(),
        PixelFormat::Grayscale => pixels.iter().map(|&p| ycbcr(p)[0]).collect(),
    }
}

/// JFIF RGB to YCbCr, 16-bit fixed point.
fn ycbcr(p: RGB8) -> [u8; 3] {
    const HALF: i32 = 1 << 15;
    const CENTER: i32 = 128 << 16;
    let (r, g, b) = (i32::from(p.r), i32::from(p.g), i32::from(p.b));

    let y = (19595 * r + 38470 * g + 7471 * b + HALF) >> 16;
    let cb = (-11059 * r - 21709 * g + 32768 * b + CENTER + HALF) >> 16;
    let cr = (32768 * r - 27439 * g - 5329 * b + CENTER + HALF) >> 16;

    [clamp(y), clamp(cb), clamp(cr)]
}

fn clamp(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
