//! JPEG encoding into memory.
//!
//! The slicer probes encoded sizes while shrinking a band, so encoding
//! always targets a byte buffer. Only an accepted buffer ever reaches the
//! filesystem, which is what keeps failed bands from leaving partial files.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::Raster;

/// Errors raised while encoding a raster to JPEG.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The pixel buffer does not match the raster's dimensions.
    #[error("Pixel buffer holds {actual} bytes but {expected} were expected")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A dimension is zero; JPEG cannot represent an empty image.
    #[error("Cannot encode a {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder reported a failure.
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a raster as JPEG and return the bytes.
///
/// Quality runs from 1 to 100; out-of-range values are clamped rather than
/// rejected. The raster must be non-empty and its pixel buffer must match
/// its dimensions.
///
/// # Example
///
/// ```
/// use bandcut_core::decode::Raster;
/// use bandcut_core::encode::encode_jpeg;
///
/// let band = Raster::new(320, 40, vec![200u8; 320 * 40 * 3]);
/// let jpeg = encode_jpeg(&band, 90).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.row_bytes() * (image.height as usize);
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
