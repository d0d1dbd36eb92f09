//! bandcut: slice a tall image into horizontal bands from the command line.
//!
//! Opens an image, applies cut positions given in source pixels, and saves
//! each band as a JPEG under the configured pixel-count and file-size
//! limits. Pieces that fail are reported individually; the rest are still
//! written.
//!
//! # Usage
//!
//! ```text
//! bandcut --cut 2000 --cut 4000 tall.png
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bandcut_core::{Session, SliceLimits, SlicerConfig};
use clap::Parser;

/// Slice a tall image into horizontal bands.
///
/// Each band is saved as `<prefix>_part_NN.jpg`, re-encoded as needed so
/// it stays under the pixel-count and file-size limits.
#[derive(Parser)]
#[command(name = "bandcut", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP).
    image_path: PathBuf,

    /// Cut position in source pixels from the top. Repeat for more cuts.
    #[arg(long = "cut", value_name = "Y")]
    cuts: Vec<u32>,

    /// Maximum pixel count per saved piece.
    #[arg(long, default_value_t = SliceLimits::DEFAULT_RESOLUTION_LIMIT)]
    max_pixels: u64,

    /// Maximum encoded size per saved piece, in kilobytes of 1000 bytes.
    #[arg(long, default_value_t = SliceLimits::DEFAULT_FILE_SIZE_LIMIT)]
    max_kb: u64,

    /// JPEG quality for saved pieces (1-100).
    #[arg(long, default_value_t = SlicerConfig::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Dimension multiplier per shrink step (0 to 1, exclusive).
    #[arg(long, default_value_t = SlicerConfig::DEFAULT_REDUCE_FACTOR)]
    reduce_factor: f64,

    /// Output prefix for piece files. Defaults to the input path with its
    /// extension removed.
    #[arg(long)]
    output_prefix: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut session = Session::new();
    if let Err(e) = session.open(&cli.image_path) {
        eprintln!("Error opening {}: {e}", cli.image_path.display());
        return ExitCode::FAILURE;
    }

    if let Some(image) = session.image() {
        eprintln!(
            "Image: {} ({}x{})",
            cli.image_path.display(),
            image.width,
            image.height,
        );
    }

    for &cut in &cli.cuts {
        session.add_cut(cut);
    }
    eprintln!("Pieces: {}", session.piece_count());

    let limits = SliceLimits {
        resolution_limit: cli.max_pixels,
        file_size_limit: cli.max_kb,
    };
    let config = SlicerConfig {
        reduce_factor: cli.reduce_factor,
        jpeg_quality: cli.quality,
        ..SlicerConfig::default()
    };

    let report = match session.save(&limits, &config, cli.output_prefix.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for band in &report.bands {
        match &band.outcome {
            Ok(saved) => println!(
                "{}: {}x{}, {} bytes, {} shrink step(s)",
                saved.path.display(),
                saved.width,
                saved.height,
                saved.encoded_bytes,
                saved.iterations,
            ),
            Err(e) => eprintln!(
                "Piece {} (rows {}..{}): {e}",
                band.index + 1,
                band.top,
                band.bottom,
            ),
        }
    }

    if report.all_saved() {
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "{} of {} piece(s) failed",
            report.failed_count(),
            report.bands.len(),
        );
        ExitCode::FAILURE
    }
}
