//! Shared types for the fusain sketch pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// single-channel sketch buffers without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference the
/// original decoded image without depending on `image` directly.
pub use image::RgbImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the sketch pipeline.
///
/// All parameters default to the values of the deployed pipeline:
/// a 21×21 Gaussian blur kernel with sigma derived from the kernel size.
///
/// # Invariants
///
/// `blur_kernel_size` must be odd and positive. [`SketchConfig::validate`]
/// enforces this and is called by the pipeline entry points; invalid
/// values yield [`PipelineError::InvalidConfig`]. The blur stage itself
/// additionally rounds an even size up to the next odd one as
/// defense-in-depth, so a bypassed validation cannot produce a kernel
/// without a defined center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchConfig {
    /// Gaussian blur kernel size (odd, positive). Controls the apparent
    /// pencil stroke thickness: larger kernels produce softer shading.
    pub blur_kernel_size: u32,

    /// Gaussian blur sigma. Non-positive values derive sigma from the
    /// kernel size via [`crate::blur::auto_sigma`].
    pub blur_sigma: f32,
}

impl SketchConfig {
    /// Default blur kernel size.
    pub const DEFAULT_BLUR_KERNEL_SIZE: u32 = 21;

    /// Default blur sigma. Zero means "derive from kernel size".
    pub const DEFAULT_BLUR_SIGMA: f32 = 0.0;

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if `blur_kernel_size`
    /// is zero or even.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "blur kernel size must be odd and positive, got {}",
                self.blur_kernel_size
            )));
        }
        Ok(())
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: Self::DEFAULT_BLUR_KERNEL_SIZE,
            blur_sigma: Self::DEFAULT_BLUR_SIGMA,
        }
    }
}

/// Result of running the sketch pipeline.
#[derive(Debug, Clone)]
pub struct SketchResult {
    /// The single-channel pencil sketch.
    pub sketch: GrayImage,

    /// Dimensions of the source image in pixels. The sketch always has
    /// the same dimensions as the source.
    pub dimensions: Dimensions,
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved.
///
/// Each field captures the output of one pipeline stage, enabling
/// callers to inspect or dump every step of the processing chain.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 0: original decoded RGB image (pre-processing).
    pub original: RgbImage,
    /// Stage 1: grayscale intensity image (BT.601 luma).
    pub gray: GrayImage,
    /// Stage 2: inverted grayscale image.
    pub inverted: GrayImage,
    /// Stage 3: Gaussian-blurred inverted image.
    pub blurred: GrayImage,
    /// Stage 4: re-inverted blurred image (the dodge divisor).
    pub inverted_blurred: GrayImage,
    /// Stage 5: dodge-blend division of gray by the divisor.
    pub dodged: GrayImage,
    /// Stage 6: sharpened final sketch.
    pub sketch: GrayImage,
    /// Source image dimensions in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
///
/// The transform stages themselves are total over well-formed buffers;
/// only decoding and configuration can fail.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
