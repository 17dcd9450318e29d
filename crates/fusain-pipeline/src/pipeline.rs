//! Incremental pipeline: advance stage-by-stage, inspecting each
//! intermediate result before continuing.
//!
//! Unlike [`crate::process`] which runs the entire pipeline in one
//! call, the typestate stages here let the caller drive execution one
//! step at a time:
//!
//! ```rust
//! # use fusain_pipeline::{pipeline::Pending, SketchConfig, PipelineError};
//! # fn run(png: Vec<u8>) -> Result<(), PipelineError> {
//! let staged = Pending::new(png, SketchConfig::default())
//!     .decode()?
//!     .grayscale()
//!     .blur()
//!     .dodge()
//!     .sharpen()
//!     .into_result();
//! # Ok(())
//! # }
//! ```
//!
//! Each stage method consumes `self` and returns the next pipeline
//! state, carrying all previously computed intermediates. Every
//! intermediate buffer is retained through to [`StagedResult`], which
//! callers use for stage dumps and previews; callers that only need
//! the final sketch should prefer [`crate::process`], which discards
//! the intermediates as it goes.

use image::{GrayImage, RgbImage};

use crate::types::{Dimensions, PipelineError, SketchConfig, StagedResult};
use crate::{blur, dodge, grayscale, invert, sharpen};

// ───────────────────────── Stage 0: Pending ──────────────────────────

/// Pipeline state before any processing has occurred.
///
/// The source image bytes and config are stored but not yet touched.
/// Call [`decode`](Self::decode) to advance to the next stage.
#[must_use = "pipeline stages are consumed by advancing — call .decode() to continue"]
pub struct Pending {
    config: SketchConfig,
    source: Vec<u8>,
}

impl Pending {
    /// Create a pipeline over the given source bytes and configuration.
    pub const fn new(source: Vec<u8>, config: SketchConfig) -> Self {
        Self { config, source }
    }

    /// The raw source image bytes.
    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Validate the config, decode the source image, and advance to
    /// the [`Decoded`] stage.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if the blur kernel size
    /// is even or zero. Returns [`PipelineError::EmptyInput`] if the
    /// source bytes are empty, and [`PipelineError::ImageDecode`] if
    /// the image format is unrecognized or the data is corrupt.
    pub fn decode(self) -> Result<Decoded, PipelineError> {
        self.config.validate()?;
        let original = grayscale::decode(&self.source)?;
        let dimensions = Dimensions {
            width: original.width(),
            height: original.height(),
        };
        Ok(Decoded {
            config: self.config,
            original,
            dimensions,
        })
    }
}

// ───────────────────────── Stage 1: Decoded ──────────────────────────

/// Pipeline state after decoding the source image into an RGB buffer.
#[must_use = "pipeline stages are consumed by advancing — call .grayscale() to continue"]
pub struct Decoded {
    config: SketchConfig,
    original: RgbImage,
    dimensions: Dimensions,
}

impl Decoded {
    /// The original decoded RGB image.
    #[must_use]
    pub const fn original(&self) -> &RgbImage {
        &self.original
    }

    /// Source image dimensions in pixels.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Convert to grayscale intensity and advance.
    pub fn grayscale(self) -> Grayscaled {
        let gray = grayscale::luma(&self.original);
        Grayscaled {
            config: self.config,
            original: self.original,
            gray,
            dimensions: self.dimensions,
        }
    }
}

// ──────────────────────── Stage 2: Grayscaled ────────────────────────

/// Pipeline state after grayscale conversion.
#[must_use = "pipeline stages are consumed by advancing — call .blur() to continue"]
pub struct Grayscaled {
    config: SketchConfig,
    original: RgbImage,
    gray: GrayImage,
    dimensions: Dimensions,
}

impl Grayscaled {
    /// The grayscale intensity image.
    #[must_use]
    pub const fn gray(&self) -> &GrayImage {
        &self.gray
    }

    /// Invert, Gaussian-blur, and re-invert, advancing past the three
    /// middle stages in one step. The re-inverted blur is the divisor
    /// for the upcoming dodge blend.
    pub fn blur(self) -> Blurred {
        let inverted = invert::invert(&self.gray);
        let blurred = blur::gaussian_blur(
            &inverted,
            self.config.blur_kernel_size,
            self.config.blur_sigma,
        );
        let inverted_blurred = invert::invert(&blurred);
        Blurred {
            original: self.original,
            gray: self.gray,
            inverted,
            blurred,
            inverted_blurred,
            dimensions: self.dimensions,
        }
    }
}

// ───────────────────────── Stage 3: Blurred ──────────────────────────

/// Pipeline state after invert → blur → invert.
#[must_use = "pipeline stages are consumed by advancing — call .dodge() to continue"]
pub struct Blurred {
    original: RgbImage,
    gray: GrayImage,
    inverted: GrayImage,
    blurred: GrayImage,
    inverted_blurred: GrayImage,
    dimensions: Dimensions,
}

impl Blurred {
    /// The Gaussian-blurred inverted image.
    #[must_use]
    pub const fn blurred(&self) -> &GrayImage {
        &self.blurred
    }

    /// The re-inverted blur (the dodge divisor).
    #[must_use]
    pub const fn inverted_blurred(&self) -> &GrayImage {
        &self.inverted_blurred
    }

    /// Apply the dodge-blend division and advance.
    pub fn dodge(self) -> Dodged {
        let dodged = dodge::dodge_blend(&self.gray, &self.inverted_blurred);
        Dodged {
            original: self.original,
            gray: self.gray,
            inverted: self.inverted,
            blurred: self.blurred,
            inverted_blurred: self.inverted_blurred,
            dodged,
            dimensions: self.dimensions,
        }
    }
}

// ────────────────────────── Stage 4: Dodged ──────────────────────────

/// Pipeline state after the dodge blend.
#[must_use = "pipeline stages are consumed by advancing — call .sharpen() to continue"]
pub struct Dodged {
    original: RgbImage,
    gray: GrayImage,
    inverted: GrayImage,
    blurred: GrayImage,
    inverted_blurred: GrayImage,
    dodged: GrayImage,
    dimensions: Dimensions,
}

impl Dodged {
    /// The dodge-blended sketch, before sharpening.
    #[must_use]
    pub const fn dodged(&self) -> &GrayImage {
        &self.dodged
    }

    /// Apply the final sharpening pass and advance.
    pub fn sharpen(self) -> Sharpened {
        let sketch = sharpen::sharpen(&self.dodged);
        Sharpened {
            original: self.original,
            gray: self.gray,
            inverted: self.inverted,
            blurred: self.blurred,
            inverted_blurred: self.inverted_blurred,
            dodged: self.dodged,
            sketch,
            dimensions: self.dimensions,
        }
    }
}

// ───────────────────────── Stage 5: Sharpened ────────────────────────

/// Final pipeline state holding every intermediate plus the sketch.
#[must_use = "call .into_result() to take the staged result"]
pub struct Sharpened {
    original: RgbImage,
    gray: GrayImage,
    inverted: GrayImage,
    blurred: GrayImage,
    inverted_blurred: GrayImage,
    dodged: GrayImage,
    sketch: GrayImage,
    dimensions: Dimensions,
}

impl Sharpened {
    /// The finished pencil sketch.
    #[must_use]
    pub const fn sketch(&self) -> &GrayImage {
        &self.sketch
    }

    /// Consume the pipeline and return every stage output.
    pub fn into_result(self) -> StagedResult {
        StagedResult {
            original: self.original,
            gray: self.gray,
            inverted: self.inverted,
            blurred: self.blurred,
            inverted_blurred: self.inverted_blurred,
            dodged: self.dodged,
            sketch: self.sketch,
            dimensions: self.dimensions,
        }
    }
}
