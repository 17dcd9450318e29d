//! fusain-pipeline: Pure pencil-sketch pipeline (sans-IO).
//!
//! Converts raster photographs into pencil-sketch images through:
//! grayscale -> invert -> Gaussian blur -> invert -> dodge blend ->
//! sharpen.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and pixel buffers and returns structured data. All
//! filesystem interaction lives in `fusain-io`.
//!
//! The transform is a pure function: the same input bytes and config
//! always produce a byte-identical sketch, and no stage mutates its
//! input buffer. It holds no shared state, so independent invocations
//! are safe from any number of threads.

pub mod blur;
pub mod convolve;
pub mod dodge;
pub mod grayscale;
pub mod invert;
pub mod pipeline;
pub mod sharpen;
pub mod types;

pub use pipeline::Pending;
pub use types::{Dimensions, PipelineError, SketchConfig, SketchResult, StagedResult};

use image::{GrayImage, RgbImage};

/// Transform an already-decoded color buffer into a pencil sketch.
///
/// Total over well-formed input: never fails, and the output has the
/// input's dimensions. Numeric edge cases (division by a zero blur
/// divisor, convolution overflow) are floored or clamped, never raised.
///
/// `config` is not validated here; an even blur kernel size is rounded
/// up by the blur stage. Use [`process`] for the validating entry point.
#[must_use = "returns the rendered sketch"]
pub fn render(image: &RgbImage, config: &SketchConfig) -> GrayImage {
    let gray = grayscale::luma(image);
    let inverted = invert::invert(&gray);
    let blurred = blur::gaussian_blur(&inverted, config.blur_kernel_size, config.blur_sigma);
    let inverted_blurred = invert::invert(&blurred);
    let dodged = dodge::dodge_blend(&gray, &inverted_blurred);
    sharpen::sharpen(&dodged)
}

/// Run the full sketch pipeline over raw image bytes.
///
/// Takes raw image bytes (PNG, JPEG, BMP, TIFF, WebP -- sniffed from
/// content) and a configuration, and produces a [`SketchResult`]
/// holding the single-channel sketch and the source dimensions.
///
/// # Pipeline steps
///
/// 1. Decode and convert to grayscale (BT.601 luma)
/// 2. Invert
/// 3. Gaussian blur (21x21 by default, auto-derived sigma)
/// 4. Invert the blur
/// 5. Dodge-blend division (scale 256, divisor floored at 1)
/// 6. Sharpen (fixed unit-gain 3x3 kernel)
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if the blur kernel size is
/// even or zero, [`PipelineError::EmptyInput`] if `image_bytes` is
/// empty, and [`PipelineError::ImageDecode`] if the format is
/// unrecognized or the data is corrupt. The transform stages themselves
/// never fail.
pub fn process(image_bytes: &[u8], config: &SketchConfig) -> Result<SketchResult, PipelineError> {
    config.validate()?;
    let original = grayscale::decode(image_bytes)?;
    let dimensions = Dimensions {
        width: original.width(),
        height: original.height(),
    };
    Ok(SketchResult {
        sketch: render(&original, config),
        dimensions,
    })
}

/// Run the full pipeline, preserving every intermediate stage output.
///
/// Same semantics as [`process`], but returns a [`StagedResult`] with
/// the original RGB image and all six stage buffers, for stage dumps
/// and previews.
///
/// # Errors
///
/// Same as [`process`].
pub fn process_staged(
    image_bytes: &[u8],
    config: &SketchConfig,
) -> Result<StagedResult, PipelineError> {
    Ok(Pending::new(image_bytes.to_vec(), config.clone())
        .decode()?
        .grayscale()
        .blur()
        .dodge()
        .sharpen()
        .into_result())
}
