//! Resampling to exact target dimensions.
//!
//! One resize function serves both consumers: preview scaling and the
//! slicer's shrink loop. The input raster is never modified, which the
//! shrink loop relies on: every iteration resamples from the same band
//! instead of compounding losses through repeated downscales.

use super::{DecodeError, FilterType, Raster};

/// Resample a raster to the given dimensions.
///
/// When the target matches the current size the raster is returned as a
/// copy without resampling.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` when either target dimension is
/// zero, or `DecodeError::CorruptedFile` when the pixel buffer does not
/// match the raster's stated dimensions.
pub fn resize(
    image: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;
    let resampled = image::imageops::resize(&rgb, width, height, filter.to_image_filter());

    Ok(Raster::from_rgb_image(resampled))
}
