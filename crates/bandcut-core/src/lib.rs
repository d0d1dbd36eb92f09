//! Bandcut Core - Image slicing library
//!
//! This crate provides the core functionality for Bandcut, which cuts a
//! tall image into horizontal bands at user-chosen positions and saves
//! each band as a JPEG that fits a pixel-count limit and an encoded
//! file-size limit.

pub mod cuts;
pub mod decode;
pub mod encode;
pub mod preview;
pub mod session;
pub mod slicer;

pub use cuts::CutLineSet;
pub use decode::{decode_image, open_image, DecodeError, FilterType, Raster};
pub use encode::{encode_jpeg, EncodeError};
pub use preview::{render_preview, to_preview_y, to_source_y};
pub use session::{ClickAction, Session, SessionError};
pub use slicer::{slice_and_save, BandError, BandReport, SavedBand, SliceReport};

/// Output limits every saved band must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SliceLimits {
    /// Maximum pixel count (width times height) of a saved band
    pub resolution_limit: u64,
    /// Maximum encoded size of a saved band, in kilobytes of 1000 bytes
    pub file_size_limit: u64,
}

impl SliceLimits {
    /// Default pixel-count limit (6 megapixels)
    pub const DEFAULT_RESOLUTION_LIMIT: u64 = 6_000_000;

    /// Default encoded-size limit in kilobytes (2 MB)
    pub const DEFAULT_FILE_SIZE_LIMIT: u64 = 2_000;

    /// Create limits with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// The file-size limit converted to bytes
    pub fn file_size_limit_bytes(&self) -> u64 {
        self.file_size_limit.saturating_mul(1000)
    }
}

impl Default for SliceLimits {
    fn default() -> Self {
        Self {
            resolution_limit: Self::DEFAULT_RESOLUTION_LIMIT,
            file_size_limit: Self::DEFAULT_FILE_SIZE_LIMIT,
        }
    }
}

/// Tuning knobs for the slicing pipeline
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlicerConfig {
    /// Dimension multiplier per shrink step (0 to 1, exclusive)
    pub reduce_factor: f64,
    /// JPEG quality for saved bands (1 to 100)
    pub jpeg_quality: u8,
    /// Resampling filter used when shrinking bands
    pub filter: FilterType,
}

impl SlicerConfig {
    /// Default per-step dimension multiplier
    pub const DEFAULT_REDUCE_FACTOR: f64 = 0.95;

    /// Default JPEG quality for saved bands
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;

    /// Create a config with the default values
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            reduce_factor: Self::DEFAULT_REDUCE_FACTOR,
            jpeg_quality: Self::DEFAULT_JPEG_QUALITY,
            filter: FilterType::Lanczos3,
        }
    }
}
