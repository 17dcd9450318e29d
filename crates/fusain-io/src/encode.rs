//! Sketch encoding and atomic file output.
//!
//! The output format is chosen from the destination extension,
//! restricted to the same raster set the decoder accepts. Encoding
//! happens fully in memory; the bytes are then written to a temporary
//! sibling file and renamed into place, so a failed encode or a failed
//! write never leaves a truncated output file behind.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageFormat};

/// Errors from encoding or writing a sketch.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The sketch buffer has zero width or height.
    #[error("sketch buffer is zero-sized")]
    EmptyImage,

    /// The destination extension names no supported raster format.
    #[error("unsupported output format for '{}'", path.display())]
    UnsupportedFormat {
        /// The rejected destination path.
        path: PathBuf,
    },

    /// The encoder itself failed.
    #[error("failed to encode sketch: {0}")]
    Encode(#[source] image::ImageError),

    /// Writing or renaming the output file failed.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

/// Encode a sketch as PNG bytes in memory.
///
/// PNG is the format the deployed configuration always writes; this
/// entry point serves callers that stream the result instead of
/// persisting it.
///
/// # Errors
///
/// Returns [`EncodeError::EmptyImage`] for a zero-sized buffer and
/// [`EncodeError::Encode`] if the PNG encoder fails.
pub fn encode_png(sketch: &GrayImage) -> Result<Vec<u8>, EncodeError> {
    encode(sketch, ImageFormat::Png)
}

/// Encode a sketch and write it to `path`, atomically.
///
/// The format comes from the extension of `path` (PNG, JPEG, BMP,
/// TIFF, or WebP). The encoded bytes land in a `.tmp` sibling first and
/// are renamed over the destination only once complete.
///
/// # Errors
///
/// Returns [`EncodeError::EmptyImage`] for a zero-sized buffer,
/// [`EncodeError::UnsupportedFormat`] for an unrecognized extension,
/// [`EncodeError::Encode`] if encoding fails, and [`EncodeError::Io`]
/// if the destination cannot be written.
pub fn save_sketch(sketch: &GrayImage, path: &Path) -> Result<(), EncodeError> {
    let format = output_format(path).ok_or_else(|| EncodeError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let bytes = encode(sketch, format)?;
    write_atomic(path, &bytes)
}

/// Map a destination path to its output format.
///
/// `None` for extensions outside the decoder's format set.
fn output_format(path: &Path) -> Option<ImageFormat> {
    match ImageFormat::from_path(path).ok()? {
        format @ (ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::WebP) => Some(format),
        _ => None,
    }
}

/// Encode a sketch into in-memory bytes in the given format.
fn encode(sketch: &GrayImage, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    if sketch.width() == 0 || sketch.height() == 0 {
        return Err(EncodeError::EmptyImage);
    }

    let dynamic = DynamicImage::ImageLuma8(sketch.clone());
    // The BMP and WebP encoders in `image` only accept RGB(A) samples;
    // widen the single channel for those formats.
    let dynamic = match format {
        ImageFormat::Bmp | ImageFormat::WebP => DynamicImage::ImageRgb8(dynamic.to_rgb8()),
        _ => dynamic,
    };

    let mut buf = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut buf), format)
        .map_err(EncodeError::Encode)?;
    Ok(buf)
}

/// Write bytes to `path` via a temporary sibling and rename.
///
/// The temporary file lives in the destination directory so the rename
/// stays on one filesystem. On any failure the temporary is removed and
/// the destination is left untouched.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), EncodeError> {
    let tmp = temp_sibling(path);
    fs::write(&tmp, bytes).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        EncodeError::Io {
            path: tmp.clone(),
            source,
        }
    })?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(EncodeError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("sketch"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                image::Luma([0])
            } else {
                image::Luma([255])
            }
        })
    }

    #[test]
    fn encode_png_round_trips() {
        let sketch = checker(9, 7);
        let bytes = encode_png(&sketch).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_luma8();
        assert_eq!(decoded, sketch);
    }

    #[test]
    fn zero_sized_buffer_is_rejected() {
        let empty = GrayImage::new(0, 0);
        assert!(matches!(encode_png(&empty), Err(EncodeError::EmptyImage)));
    }

    #[test]
    fn output_format_follows_extension() {
        assert_eq!(
            output_format(Path::new("out.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            output_format(Path::new("out.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            output_format(Path::new("out.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(output_format(Path::new("out.gif")), None);
        assert_eq!(output_format(Path::new("out")), None);
    }

    #[test]
    fn bmp_widens_gray_to_rgb() {
        // The BMP encoder rejects L8 input; encoding must still succeed.
        let bytes = encode(&checker(4, 4), ImageFormat::Bmp).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_luma8();
        assert_eq!(decoded, checker(4, 4));
    }

    #[test]
    fn temp_sibling_stays_in_the_same_directory() {
        let tmp = temp_sibling(Path::new("/some/dir/out.png"));
        assert_eq!(tmp, Path::new("/some/dir/out.png.tmp"));
    }
}
