//! fusain: turn a photograph into a pencil sketch.
//!
//! Thin CLI over the `fusain-pipeline` / `fusain-io` crates: path in,
//! path out, optional stage dumps for inspecting the intermediate
//! buffers.
//!
//! # Usage
//!
//! ```text
//! fusain photo.jpg -o sketch.png
//! fusain photo.jpg -o sketch.png --kernel-size 31 --dump-stages stages/
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fusain_io::SketchError;
use fusain_pipeline::{Dimensions, SketchConfig};

/// Convert a photograph into a pencil sketch.
#[derive(Parser)]
#[command(name = "fusain", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, TIFF, WebP).
    input: PathBuf,

    /// Output image path (PNG recommended).
    #[arg(short, long)]
    output: PathBuf,

    /// Gaussian blur kernel size (odd). Larger values thicken strokes.
    #[arg(long, default_value_t = SketchConfig::DEFAULT_BLUR_KERNEL_SIZE)]
    kernel_size: u32,

    /// Gaussian blur sigma. Non-positive derives sigma from the kernel size.
    #[arg(long, default_value_t = SketchConfig::DEFAULT_BLUR_SIGMA)]
    sigma: f32,

    /// Write every intermediate stage as a PNG into this directory.
    #[arg(long, value_name = "DIR")]
    dump_stages: Option<PathBuf>,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, the other pipeline parameter flags are ignored.
    /// The JSON must be a valid `SketchConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

impl Cli {
    fn config(&self) -> Result<SketchConfig, serde_json::Error> {
        self.config_json.as_deref().map_or_else(
            || {
                Ok(SketchConfig {
                    blur_kernel_size: self.kernel_size,
                    blur_sigma: self.sigma,
                })
            },
            serde_json::from_str,
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: invalid --config-json: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config) {
        Ok(dimensions) => {
            println!(
                "Sketch written to {} ({}x{})",
                cli.output.display(),
                dimensions.width,
                dimensions.height,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            eprintln!("Could not process the image. Please try another image.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &SketchConfig) -> Result<Dimensions, SketchError> {
    match &cli.dump_stages {
        None => fusain_io::sketch_file(&cli.input, &cli.output, config),
        Some(dir) => {
            let bytes = fs::read(&cli.input).map_err(|source| SketchError::Read {
                path: cli.input.clone(),
                source,
            })?;
            let staged = fusain_pipeline::process_staged(&bytes, config)?;

            fs::create_dir_all(dir).map_err(|source| {
                SketchError::Encode(fusain_io::EncodeError::Io {
                    path: dir.clone(),
                    source,
                })
            })?;
            let stages = [
                ("1-grayscale.png", &staged.gray),
                ("2-inverted.png", &staged.inverted),
                ("3-blurred.png", &staged.blurred),
                ("4-inverted-blurred.png", &staged.inverted_blurred),
                ("5-dodged.png", &staged.dodged),
                ("6-sharpened.png", &staged.sketch),
            ];
            for (name, stage) in stages {
                fusain_io::save_sketch(stage, &dir.join(name))?;
            }

            fusain_io::save_sketch(&staged.sketch, &cli.output)?;
            Ok(staged.dimensions)
        }
    }
}
