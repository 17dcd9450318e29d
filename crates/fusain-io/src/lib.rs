//! fusain-io: filesystem boundary around the sketch pipeline.
//!
//! The pipeline crate is pure and sans-IO; this crate supplies the two
//! effects around it -- reading source bytes from disk and persisting
//! the encoded sketch -- plus [`sketch_file`], the single operation the
//! surrounding application calls: path in, path out, one success or
//! failure signal for the whole decode → transform → encode sequence.

pub mod encode;

pub use encode::{EncodeError, encode_png, save_sketch};

use std::fs;
use std::path::{Path, PathBuf};

use fusain_pipeline::{Dimensions, PipelineError, SketchConfig};

/// Errors from the whole file-to-file sketch operation.
///
/// Callers that only need a success/failure outcome can treat this as
/// opaque; the variants exist so logging can distinguish a bad input
/// from a bad destination.
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// The input file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// The input path.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },

    /// Decoding or transforming the image failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Encoding or writing the sketch failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Convert the image at `input` into a pencil sketch at `output`.
///
/// Reads the input bytes, runs the pipeline, and writes the encoded
/// sketch atomically (no partial file survives a failure). The output
/// format follows the extension of `output`; the deployed configuration
/// always uses `.png`.
///
/// Returns the source image dimensions on success.
///
/// # Errors
///
/// Returns [`SketchError::Read`] if the input cannot be read,
/// [`SketchError::Pipeline`] if it cannot be decoded (empty,
/// unrecognized, or corrupt) or the config is invalid, and
/// [`SketchError::Encode`] if the sketch cannot be encoded or written.
pub fn sketch_file(
    input: &Path,
    output: &Path,
    config: &SketchConfig,
) -> Result<Dimensions, SketchError> {
    let bytes = fs::read(input).map_err(|source| SketchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let result = fusain_pipeline::process(&bytes, config)?;
    encode::save_sketch(&result.sketch, output)?;
    Ok(result.dimensions)
}
