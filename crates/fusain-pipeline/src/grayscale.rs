//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, TIFF, WebP) and produces
//! the color buffer the pipeline starts from, plus the luma-weighted
//! grayscale conversion that is its first transform stage.
//!
//! The format is sniffed from the byte content, never from a file
//! extension.

use image::{GrayImage, RgbImage};

use crate::convolve::round_to_u8;
use crate::types::PipelineError;

/// Decode raw image bytes into a 3-channel RGB buffer.
///
/// Supports PNG, JPEG, BMP, TIFF, and WebP (whatever the `image` crate
/// features enable). The format is detected from the content.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
#[must_use = "returns the decoded RGB image"]
pub fn decode(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Convert an RGB image to grayscale using BT.601 luma weights:
/// `0.299*R + 0.587*G + 0.114*B`, rounded to nearest.
///
/// This is deliberately not `DynamicImage::to_luma8`, which uses the
/// BT.709 weights and produces slightly different intensities.
#[must_use = "returns the grayscale image"]
pub fn luma(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = 0.299f32.mul_add(
            f32::from(r),
            0.587f32.mul_add(f32::from(g), 0.114 * f32::from(b)),
        );
        image::Luma([round_to_u8(luma)])
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_error() {
        let result = decode(&[]);
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn valid_png_decodes_with_matching_dimensions() {
        let img = RgbImage::from_fn(17, 31, |_, _| image::Rgb([128, 64, 32]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();

        let decoded = decode(&buf).unwrap();
        assert_eq!(decoded.width(), 17);
        assert_eq!(decoded.height(), 31);
        assert_eq!(decoded.get_pixel(0, 0).0, [128, 64, 32]);
    }

    #[test]
    fn luma_uses_bt601_weights() {
        // 0.299 * 255 = 76.245 -> 76
        // 0.587 * 255 = 149.685 -> 150
        // 0.114 * 255 = 29.07 -> 29
        assert_eq!(luma_of(255, 0, 0), 76);
        assert_eq!(luma_of(0, 255, 0), 150);
        assert_eq!(luma_of(0, 0, 255), 29);
    }

    #[test]
    fn luma_of_neutral_gray_is_identity() {
        // The weights sum to 1, so a neutral input maps to itself.
        assert_eq!(luma_of(0, 0, 0), 0);
        assert_eq!(luma_of(128, 128, 128), 128);
        assert_eq!(luma_of(255, 255, 255), 255);
    }

    #[test]
    fn luma_preserves_dimensions() {
        let img = RgbImage::from_fn(17, 31, |_, _| image::Rgb([10, 20, 30]));
        let gray = luma(&img);
        assert_eq!(gray.width(), 17);
        assert_eq!(gray.height(), 31);
    }

    /// Helper: luma of a single 1x1 RGB pixel.
    fn luma_of(r: u8, g: u8, b: u8) -> u8 {
        let img = RgbImage::from_fn(1, 1, |_, _| image::Rgb([r, g, b]));
        luma(&img).get_pixel(0, 0).0[0]
    }
}
