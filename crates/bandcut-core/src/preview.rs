//! Preview-space coordinate mapping and preview rendering.
//!
//! The UI works on a scaled-down preview of the source image, but cut lines
//! are stored in source pixel space. The two mapping functions here convert
//! between the spaces with symmetric rounding, so a position survives a
//! round trip to within one pixel of the coarser space.
//!
//! # Coordinate System
//!
//! - y-coordinates grow downward from the top of the image
//! - `scale` is the preview size as a fraction of the source size; values
//!   below 1.0 shrink, values above 1.0 enlarge
//! - Only vertical positions are mapped; cut lines span the full width

use crate::decode::{resize, DecodeError, FilterType, Raster};

/// Color used to draw cut lines on the preview.
pub const CUT_LINE_COLOR: [u8; 3] = [255, 0, 0];

/// Map a preview-space y-coordinate to source space.
///
/// `scale` must be positive; the session enforces that before calling.
#[inline]
pub fn to_source_y(preview_y: u32, scale: f64) -> u32 {
    (f64::from(preview_y) / scale).round() as u32
}

/// Map a source-space y-coordinate to preview space.
#[inline]
pub fn to_preview_y(source_y: u32, scale: f64) -> u32 {
    (f64::from(source_y) * scale).round() as u32
}

/// Render a preview of the source image with cut lines overlaid.
///
/// The source is resized to `round(width * scale)` by `round(height * scale)`
/// (each at least 1 pixel) with Lanczos3 filtering, then every cut line is
/// drawn as a 1-pixel red horizontal line at its preview-space position.
/// Lines that map outside the preview are skipped.
///
/// # Arguments
///
/// * `source` - The source image
/// * `scale` - Preview scale factor (positive)
/// * `cut_lines` - Cut positions in source pixel space
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the source pixel buffer does not
/// match its stated dimensions.
pub fn render_preview(
    source: &Raster,
    scale: f64,
    cut_lines: &[u32],
) -> Result<Raster, DecodeError> {
    let width = ((f64::from(source.width) * scale).round() as u32).max(1);
    let height = ((f64::from(source.height) * scale).round() as u32).max(1);

    let mut preview = resize(source, width, height, FilterType::Lanczos3)?;

    for &line in cut_lines {
        let y = to_preview_y(line, scale);
        if y >= preview.height {
            continue;
        }
        let row_start = (y as usize) * preview.row_bytes();
        for x in 0..preview.width as usize {
            let idx = row_start + x * 3;
            preview.pixels[idx..idx + 3].copy_from_slice(&CUT_LINE_COLOR);
        }
    }

    Ok(preview)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
