//! Dodge-blend division: the stage that creates the pencil effect.
//!
//! Dividing the grayscale image by the inverted blur lightens the base
//! according to how little local detail the blur retained, leaving dark
//! strokes only where the original had edges. The scale factor of 256
//! maps the ratio back into the 0-255 range.

use image::GrayImage;

use crate::convolve::round_to_u8;

/// Divide `gray` by `inverted_blurred`, scaled by 256.
///
/// Per pixel: `clamp(round(gray * 256 / max(divisor, 1)), 0, 255)`.
/// The divisor is floored at 1 so a fully-blurred-out region (divisor
/// 0) never divides by zero; the numerator there is also 0 for any
/// real input, so the result stays black.
///
/// Both images must have the same dimensions; the output matches them.
#[must_use = "returns the dodge-blended image"]
pub fn dodge_blend(gray: &GrayImage, inverted_blurred: &GrayImage) -> GrayImage {
    debug_assert_eq!(gray.dimensions(), inverted_blurred.dimensions());
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let base = f32::from(gray.get_pixel(x, y).0[0]);
        let divisor = f32::from(inverted_blurred.get_pixel(x, y).0[0].max(1));
        image::Luma([round_to_u8(base * 256.0 / divisor)])
    })
}
