//! Constrained slicing of a source image into encoded bands.
//!
//! The slicer turns a source image plus a normalized cut-line set into one
//! JPEG file per band, where every file satisfies two independent limits:
//!
//! 1. **Resolution limit** - a maximum pixel count per band, met by a single
//!    aspect-preserving resize when the band is too large.
//! 2. **File-size limit** - a maximum encoded byte size, met by repeatedly
//!    shrinking the band and re-encoding until the output fits.
//!
//! # Pipeline
//!
//! Per band: crop → resolution fit → shrink/encode loop → write file.
//! Bands are independent; a band that cannot be saved is reported as failed
//! while the remaining bands still run. Failed bands leave no partial file
//! because encoding happens in memory and the file is written only for an
//! accepted buffer.

mod band;

pub use band::{crop_band, resolution_fit, shrink_to_byte_limit, EncodedBand};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::{resize, DecodeError, Raster};
use crate::encode::EncodeError;
use crate::{SliceLimits, SlicerConfig};

/// Errors that can fail an individual band.
#[derive(Debug, Error)]
pub enum BandError {
    /// The band has no area to encode.
    #[error("Band is empty: {width}x{height} pixels")]
    Degenerate { width: u32, height: u32 },

    /// A dimension reached zero before the band satisfied its limits.
    #[error("Band dimensions collapsed to zero before meeting the limit")]
    DimensionCollapse,

    /// Resampling the band failed.
    #[error("Resize failed: {0}")]
    Resize(#[from] DecodeError),

    /// Encoding the band failed.
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// A band written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBand {
    /// Path of the written JPEG file.
    pub path: PathBuf,
    /// Final width in pixels.
    pub width: u32,
    /// Final height in pixels.
    pub height: u32,
    /// Size of the written file in bytes.
    pub encoded_bytes: u64,
    /// Shrink iterations it took to satisfy the file-size limit.
    pub iterations: u32,
}

/// Outcome of one band of a slicing run.
#[derive(Debug)]
pub struct BandReport {
    /// Zero-based band index; output files are numbered from 1.
    pub index: usize,
    /// Top row of the band in the source image (inclusive).
    pub top: u32,
    /// Bottom row of the band in the source image (exclusive).
    pub bottom: u32,
    /// The saved file, or why the band failed.
    pub outcome: Result<SavedBand, BandError>,
}

/// Per-band outcomes of a slicing run.
#[derive(Debug, Default)]
pub struct SliceReport {
    /// One entry per band, in top-to-bottom order.
    pub bands: Vec<BandReport>,
}

impl SliceReport {
    /// Number of bands written to disk.
    pub fn saved_count(&self) -> usize {
        self.bands.iter().filter(|b| b.outcome.is_ok()).count()
    }

    /// Number of bands that failed.
    pub fn failed_count(&self) -> usize {
        self.bands.len() - self.saved_count()
    }

    /// True when every band was written.
    pub fn all_saved(&self) -> bool {
        self.bands.iter().all(|b| b.outcome.is_ok())
    }
}

/// Build the band boundaries for an image of the given height.
///
/// The boundaries are the cut lines with the image edges prepended and
/// appended: `n` cut lines partition the image into `n + 1` contiguous
/// `(top, bottom)` bands covering every row exactly once. Cut lines are
/// expected to be normalized already.
pub fn partition(height: u32, cut_lines: &[u32]) -> Vec<(u32, u32)> {
    let mut bounds = Vec::with_capacity(cut_lines.len() + 2);
    bounds.push(0);
    bounds.extend_from_slice(cut_lines);
    bounds.push(height);

    bounds.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Output path for a band: `<prefix>_part_<NN>.jpg`, numbered from 1.
fn band_path(output_prefix: &Path, index: usize) -> PathBuf {
    let mut name = output_prefix.as_os_str().to_os_string();
    name.push(format!("_part_{:02}.jpg", index + 1));
    PathBuf::from(name)
}

/// Slice the source image along the given cut lines and write one JPEG per
/// band.
///
/// # Arguments
///
/// * `source` - The source image
/// * `cut_lines` - Normalized cut positions (sorted, strictly inside the
///   image); stray values surface as degenerate bands rather than being
///   silently cleaned
/// * `limits` - Resolution and file-size limits every band must satisfy
/// * `config` - Encoding quality, shrink factor, and resampling filter
/// * `output_prefix` - Files are written to `<prefix>_part_<NN>.jpg`
///
/// # Returns
///
/// A report with one entry per band. The run itself never fails; individual
/// bands do, and a failed band never leaves a partial file behind.
pub fn slice_and_save(
    source: &Raster,
    cut_lines: &[u32],
    limits: &SliceLimits,
    config: &SlicerConfig,
    output_prefix: &Path,
) -> SliceReport {
    let bands = partition(source.height, cut_lines);
    log::info!(
        "slicing {}x{} image into {} bands",
        source.width,
        source.height,
        bands.len()
    );

    let mut report = SliceReport::default();
    for (index, &(top, bottom)) in bands.iter().enumerate() {
        let outcome = save_band(source, index, top, bottom, limits, config, output_prefix);
        if let Err(ref e) = outcome {
            log::warn!("band {} failed: {}", index + 1, e);
        }
        report.bands.push(BandReport {
            index,
            top,
            bottom,
            outcome,
        });
    }
    report
}

/// Run one band through the crop → fit → shrink pipeline and write it out.
fn save_band(
    source: &Raster,
    index: usize,
    top: u32,
    bottom: u32,
    limits: &SliceLimits,
    config: &SlicerConfig,
    output_prefix: &Path,
) -> Result<SavedBand, BandError> {
    let band_height = bottom.saturating_sub(top);
    if band_height == 0 || source.width == 0 {
        return Err(BandError::Degenerate {
            width: source.width,
            height: band_height,
        });
    }

    let band = crop_band(source, top, bottom);

    // Resolution pass: a single aspect-preserving resize, skipped when the
    // band is already within the limit
    let band = match resolution_fit(band.width, band.height, limits.resolution_limit) {
        Some((width, height)) => {
            if width == 0 || height == 0 {
                return Err(BandError::DimensionCollapse);
            }
            log::debug!(
                "band {}: {}x{} exceeds {} pixels, fitting to {}x{}",
                index + 1,
                band.width,
                band.height,
                limits.resolution_limit,
                width,
                height
            );
            resize(&band, width, height, config.filter)?
        }
        None => band,
    };

    // File-size pass: shrink and re-encode in memory until the band fits
    let encoded = shrink_to_byte_limit(&band, limits.file_size_limit_bytes(), config)?;

    let path = band_path(output_prefix, index);
    fs::write(&path, &encoded.bytes).map_err(|e| BandError::Io(e.to_string()))?;
    log::info!(
        "saved {} ({}x{}, {} bytes, {} shrink steps)",
        path.display(),
        encoded.width,
        encoded.height,
        encoded.bytes.len(),
        encoded.iterations
    );

    Ok(SavedBand {
        path,
        width: encoded.width,
        height: encoded.height,
        encoded_bytes: encoded.bytes.len() as u64,
        iterations: encoded.iterations,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
