//! Per-band operations: cropping, resolution fitting, and the shrink loop.

use crate::decode::{resize, Raster};
use crate::encode::encode_jpeg;
use crate::SlicerConfig;

use super::BandError;

/// Cut a full-width horizontal band out of the source image.
///
/// The band covers rows `top..bottom`. Since bands span the full width, the
/// pixel data is one contiguous run of rows and is copied as a single slice.
/// `bottom` is clamped to the image height; callers are responsible for
/// rejecting empty ranges first.
pub fn crop_band(source: &Raster, top: u32, bottom: u32) -> Raster {
    let bottom = bottom.min(source.height);
    let top = top.min(bottom);

    let row_bytes = source.row_bytes();
    let start = (top as usize) * row_bytes;
    let end = (bottom as usize) * row_bytes;

    Raster::new(source.width, bottom - top, source.pixels[start..end].to_vec())
}

/// Compute the dimensions that bring a band under the resolution limit.
///
/// Returns `None` when `width * height` is already within the limit and no
/// resize is needed. Otherwise returns the aspect-preserving target
/// dimensions, each biased one pixel low so the result lands strictly under
/// the limit:
///
/// ```text
/// new_w = floor(sqrt(limit * w / h)) - 1
/// new_h = floor(sqrt(limit * h / w)) - 1
/// ```
///
/// A returned dimension may be zero when the limit is too small for the
/// band's aspect ratio; callers treat that as a failed band.
pub fn resolution_fit(width: u32, height: u32, resolution_limit: u64) -> Option<(u32, u32)> {
    let area = u64::from(width) * u64::from(height);
    if area <= resolution_limit {
        return None;
    }

    let w = f64::from(width);
    let h = f64::from(height);
    let limit = resolution_limit as f64;

    let new_w = ((limit * w / h).sqrt().floor() - 1.0).max(0.0) as u32;
    let new_h = ((limit * h / w).sqrt().floor() - 1.0).max(0.0) as u32;

    Some((new_w, new_h))
}

/// A band encoded to JPEG, with the dimensions that satisfied the limit.
#[derive(Debug)]
pub struct EncodedBand {
    /// The accepted JPEG buffer.
    pub bytes: Vec<u8>,
    /// Width at which the buffer was encoded.
    pub width: u32,
    /// Height at which the buffer was encoded.
    pub height: u32,
    /// Number of shrink iterations it took to get under the limit.
    pub iterations: u32,
}

/// Shrink a band until its JPEG encoding fits under `byte_limit`.
///
/// Each iteration multiplies both dimensions by the configured reduce
/// factor (truncating to whole pixels), resamples the band to the new size,
/// and encodes it to memory. The loop stops at the first encoding strictly
/// smaller than `byte_limit`. The first shrink happens before the first
/// encode, so the output is always at least one step smaller than the input
/// even when the band would already fit.
///
/// Every iteration resamples from `band` itself, not from the previous
/// iteration's output, so quality does not degrade cumulatively.
///
/// # Errors
///
/// Returns `BandError::DimensionCollapse` when a dimension reaches zero
/// before the limit is met, or the underlying resize/encode error.
pub fn shrink_to_byte_limit(
    band: &Raster,
    byte_limit: u64,
    config: &SlicerConfig,
) -> Result<EncodedBand, BandError> {
    // A factor at or above 1.0 would never shrink
    let factor = config.reduce_factor.min(0.99);

    let mut width = band.width;
    let mut height = band.height;
    let mut iterations = 0u32;

    loop {
        width = (f64::from(width) * factor) as u32;
        height = (f64::from(height) * factor) as u32;
        if width == 0 || height == 0 {
            return Err(BandError::DimensionCollapse);
        }
        iterations += 1;

        let scaled = resize(band, width, height, config.filter)?;
        let bytes = encode_jpeg(&scaled, config.jpeg_quality)?;
        log::debug!(
            "shrink step {}: {}x{} encodes to {} bytes (limit {})",
            iterations,
            width,
            height,
            bytes.len(),
            byte_limit
        );

        if (bytes.len() as u64) < byte_limit {
            return Ok(EncodedBand {
                bytes,
                width,
                height,
                iterations,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn position_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        Raster::new(width, height, pixels)
    }

    fn gray_image(width: u32, height: u32) -> Raster {
        Raster::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_crop_band_middle_rows() {
        let img = position_image(4, 8);
        let band = crop_band(&img, 2, 5);

        assert_eq!(band.width, 4);
        assert_eq!(band.height, 3);
        // First pixel comes from (0, 2): value (2 * 4 + 0) % 256 = 8
        assert_eq!(band.pixels[0], 8);
        // Last pixel comes from (3, 4): value (4 * 4 + 3) % 256 = 19
        assert_eq!(band.pixels[band.pixels.len() - 1], 19);
    }

    #[test]
    fn test_crop_band_full_height() {
        let img = position_image(10, 6);
        let band = crop_band(&img, 0, 6);

        assert_eq!(band, img);
    }

    #[test]
    fn test_crop_band_clamps_bottom() {
        let img = position_image(4, 8);
        let band = crop_band(&img, 6, 100);

        assert_eq!(band.height, 2);
    }

    #[test]
    fn test_resolution_fit_within_limit() {
        assert_eq!(resolution_fit(1000, 2000, 6_000_000), None);
    }

    #[test]
    fn test_resolution_fit_exactly_at_limit() {
        // The limit is only enforced when strictly exceeded
        assert_eq!(resolution_fit(1000, 6000, 6_000_000), None);
    }

    #[test]
    fn test_resolution_fit_over_limit() {
        // 3000x4000 = 12M pixels against a 6M limit:
        // new_w = floor(sqrt(6M * 3000 / 4000)) - 1 = floor(2121.32) - 1 = 2120
        // new_h = floor(sqrt(6M * 4000 / 3000)) - 1 = floor(2828.42) - 1 = 2827
        let (w, h) = resolution_fit(3000, 4000, 6_000_000).unwrap();
        assert_eq!((w, h), (2120, 2827));
        assert!(u64::from(w) * u64::from(h) < 6_000_000);
    }

    #[test]
    fn test_resolution_fit_square() {
        let (w, h) = resolution_fit(4000, 4000, 4_000_000).unwrap();
        assert_eq!((w, h), (1999, 1999));
    }

    #[test]
    fn test_resolution_fit_collapses_skinny_band() {
        // A 10000x10 sliver against a tiny limit: the short edge's fit
        // dimension lands below 1 and the band cannot be saved
        let (w, h) = resolution_fit(10_000, 10, 100).unwrap();
        assert_eq!(h, 0);
        assert!(w > 0);
    }

    #[test]
    fn test_shrink_always_steps_once() {
        let band = gray_image(100, 100);
        let config = SlicerConfig::default();

        // Limit far above any possible encoding: still shrinks once
        let encoded = shrink_to_byte_limit(&band, 10_000_000, &config).unwrap();

        assert_eq!(encoded.iterations, 1);
        assert_eq!((encoded.width, encoded.height), (95, 95));
        assert!(!encoded.bytes.is_empty());
    }

    #[test]
    fn test_shrink_truncates_dimensions() {
        let band = gray_image(10, 10);
        let config = SlicerConfig::default();

        // 10 * 0.95 = 9.5, truncated to 9
        let encoded = shrink_to_byte_limit(&band, 10_000_000, &config).unwrap();
        assert_eq!((encoded.width, encoded.height), (9, 9));
    }

    #[test]
    fn test_shrink_iterates_until_under_limit() {
        // Pseudo-random pixels compress poorly, forcing several iterations
        let mut pixels = Vec::with_capacity(200 * 200 * 3);
        for i in 0..200 * 200 * 3 {
            pixels.push(((i * 37) % 256) as u8);
        }
        let band = Raster::new(200, 200, pixels);
        let config = SlicerConfig::default();

        let encoded = shrink_to_byte_limit(&band, 2000, &config).unwrap();

        assert!(encoded.iterations >= 2);
        assert!((encoded.bytes.len() as u64) < 2000);
        assert!(encoded.width < 200 && encoded.height < 200);
    }

    #[test]
    fn test_shrink_unreachable_limit_collapses() {
        let band = gray_image(50, 50);
        let config = SlicerConfig::default();

        // No JPEG is ever 1 byte, so the band runs out of pixels
        let result = shrink_to_byte_limit(&band, 1, &config);
        assert!(matches!(result, Err(BandError::DimensionCollapse)));
    }

    #[test]
    fn test_shrink_clamps_runaway_factor() {
        let band = gray_image(100, 100);
        let config = SlicerConfig {
            reduce_factor: 1.5,
            ..SlicerConfig::default()
        };

        // A factor above 1.0 is clamped so the loop still makes progress
        let encoded = shrink_to_byte_limit(&band, 10_000_000, &config).unwrap();
        assert_eq!((encoded.width, encoded.height), (99, 99));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
