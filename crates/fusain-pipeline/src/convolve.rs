//! Convolution primitives shared by the blur and sharpen stages.
//!
//! Both convolutions in the pipeline use the reflect-101 border policy:
//! out-of-bounds samples mirror across the edge without repeating the
//! edge sample (`... 2 1 | 0 1 2 ... n-1 | n-2 n-3 ...`). This is the
//! conventional default border mode for Gaussian blur and 2-D
//! filtering; a different policy would change output at image edges.

use image::GrayImage;

/// Reflect an out-of-bounds coordinate back into `0..len`.
///
/// Reflect-101: the edge sample is the mirror axis and is not repeated,
/// so index `-1` maps to `1` and index `len` maps to `len - 2`. Handles
/// coordinates arbitrarily far out of range. A 1-pixel axis has no
/// neighbor to mirror to and always resolves to `0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn reflect_101(index: i64, len: u32) -> u32 {
    let len = i64::from(len);
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as u32
}

/// Round a float sample to the nearest integer and clamp to `[0, 255]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convolve a grayscale image with a 3x3 integer kernel.
///
/// Samples outside the image reflect across the edge ([`reflect_101`]);
/// each result is clamped to `[0, 255]`. Safe on degenerate 1-pixel
/// images.
#[must_use = "returns the convolved image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn filter_3x3(image: &GrayImage, kernel: &[[i32; 3]; 3]) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc: i32 = 0;
        for ky in 0..3_i64 {
            for kx in 0..3_i64 {
                let sx = reflect_101(i64::from(x) + kx - 1, width);
                let sy = reflect_101(i64::from(y) + ky - 1, height);
                let weight = kernel[ky as usize][kx as usize];
                acc += weight * i32::from(image.get_pixel(sx, sy).0[0]);
            }
        }
        image::Luma([acc.clamp(0, 255) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: [[i32; 3]; 3] = [[0, 0, 0], [0, 1, 0], [0, 0, 0]];

    #[test]
    fn reflect_in_bounds_is_identity() {
        for i in 0..5 {
            assert_eq!(reflect_101(i, 5), u32::try_from(i).unwrap_or(0));
        }
    }

    #[test]
    fn reflect_mirrors_without_repeating_edge() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
    }

    #[test]
    fn reflect_handles_far_out_of_range() {
        // Period for len 5 is 8: index 8 wraps back to 0, -8 likewise.
        assert_eq!(reflect_101(8, 5), 0);
        assert_eq!(reflect_101(-8, 5), 0);
        assert_eq!(reflect_101(11, 5), 3);
    }

    #[test]
    fn reflect_degenerate_single_pixel_axis() {
        for i in [-3, -1, 0, 1, 7] {
            assert_eq!(reflect_101(i, 1), 0);
        }
    }

    #[test]
    fn identity_kernel_returns_input() {
        let img = GrayImage::from_fn(8, 8, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            image::Luma([((x * 31 + y * 7) % 256) as u8])
        });
        assert_eq!(filter_3x3(&img, &IDENTITY), img);
    }

    #[test]
    fn results_clamp_to_byte_range() {
        // An all-ones kernel on a bright image overflows far past 255.
        let bright = GrayImage::from_pixel(4, 4, image::Luma([200]));
        let ones = [[1, 1, 1], [1, 1, 1], [1, 1, 1]];
        for pixel in filter_3x3(&bright, &ones).pixels() {
            assert_eq!(pixel.0[0], 255);
        }

        // An all-negative kernel clamps at 0.
        let neg = [[-1, -1, -1], [-1, -1, -1], [-1, -1, -1]];
        for pixel in filter_3x3(&bright, &neg).pixels() {
            assert_eq!(pixel.0[0], 0);
        }
    }

    #[test]
    fn single_pixel_image_does_not_index_out_of_bounds() {
        let img = GrayImage::from_pixel(1, 1, image::Luma([128]));
        let out = filter_3x3(&img, &IDENTITY);
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(out.get_pixel(0, 0).0[0], 128);
    }
}
