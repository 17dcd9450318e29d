//! Grayscale intensity inversion.
//!
//! Used twice in the pipeline: once on the grayscale image before
//! blurring, and once on the blurred image to form the dodge divisor.

use image::GrayImage;

/// Invert a grayscale image: `255 - v` for every pixel.
///
/// Applying the inversion twice returns the original image exactly.
#[must_use = "returns the inverted image"]
pub fn invert(image: &GrayImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        image::Luma([255 - image.get_pixel(x, y).0[0]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_becomes_white() {
        let img = GrayImage::from_pixel(3, 3, image::Luma([0]));
        let inverted = invert(&img);
        for pixel in inverted.pixels() {
            assert_eq!(pixel.0[0], 255);
        }
    }

    #[test]
    fn inversion_is_an_involution() {
        let img = GrayImage::from_fn(16, 16, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            image::Luma([((x * 16 + y) % 256) as u8])
        });
        assert_eq!(invert(&invert(&img)), img);
    }

    #[test]
    fn dimensions_preserved() {
        let img = GrayImage::new(17, 31);
        let inverted = invert(&img);
        assert_eq!(inverted.width(), 17);
        assert_eq!(inverted.height(), 31);
    }
}
