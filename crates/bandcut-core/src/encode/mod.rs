//! Image encoding pipeline for Bandcut.
//!
//! This module provides functionality for:
//! - Encoding rasters to JPEG format with configurable quality
//!
//! Encoding always targets an in-memory buffer. The slicer probes encoded
//! sizes repeatedly while shrinking a band, and only the final accepted
//! buffer is ever written to disk.
//!
//! # Examples
//!
//! ```ignore
//! use bandcut_core::decode::Raster;
//! use bandcut_core::encode::encode_jpeg;
//!
//! let raster = Raster::new(100, 100, vec![128u8; 100 * 100 * 3]);
//! let jpeg_bytes = encode_jpeg(&raster, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
