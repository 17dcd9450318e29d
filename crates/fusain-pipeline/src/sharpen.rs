//! Final sharpening pass over the dodge-blended sketch.
//!
//! A fixed unit-gain high-pass kernel crisps up the pencil strokes
//! without shifting overall brightness (the weights sum to 1, so
//! constant regions are unchanged).

use image::GrayImage;

use crate::convolve;

/// The 3x3 sharpening kernel. Weights sum to 1.
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]];

/// Sharpen a grayscale sketch with [`SHARPEN_KERNEL`].
///
/// Uses the same reflect-101 border policy as the blur stage; results
/// are clamped to `[0, 255]`.
#[must_use = "returns the sharpened image"]
pub fn sharpen(image: &GrayImage) -> GrayImage {
    convolve::filter_3x3(image, &SHARPEN_KERNEL)
}
