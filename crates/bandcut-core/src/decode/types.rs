//! Shared types for image loading and resampling.

use image::imageops;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while opening or decoding an image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not look like any supported image format.
    #[error("Unrecognized or unsupported image format")]
    InvalidFormat,

    /// The format was recognized but the data could not be decoded.
    #[error("Image data could not be decoded: {0}")]
    CorruptedFile(String),

    /// Reading the file from disk failed.
    #[error("Failed to read image file: {0}")]
    IoError(String),
}

/// A decoded RGB raster.
///
/// One type serves every stage: the opened source image, the scaled preview,
/// and each band cut out of the source. Pixels are 8-bit RGB, row-major,
/// three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 3` of them.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Wrap a pixel buffer with its dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Take ownership of a decoded `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Copy into an `image::RgbImage` for resampling.
    ///
    /// `None` when the pixel buffer does not match the stated dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Total pixel count, the quantity the resolution limit is checked
    /// against. Computed in `u64` since `u32 * u32` can overflow.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Bytes occupied by one row of pixels.
    pub fn row_bytes(&self) -> usize {
        (self.width as usize) * 3
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// True when the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor. Fast and blocky.
    Nearest,
    /// Bilinear. A reasonable speed/quality middle ground.
    #[default]
    Bilinear,
    /// Lanczos with a window of 3. Slow, sharp, used for saved output.
    Lanczos3,
}

impl FilterType {
    /// The corresponding filter in the image crate.
    pub fn to_image_filter(self) -> imageops::FilterType {
        match self {
            Self::Nearest => imageops::FilterType::Nearest,
            Self::Bilinear => imageops::FilterType::Triangle,
            Self::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation tag values 1 through 8.
///
/// Unknown values fall back to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Stored upright.
    #[default]
    Normal = 1,
    /// Mirrored left-right.
    FlipHorizontal = 2,
    /// Upside down.
    Rotate180 = 3,
    /// Mirrored top-bottom.
    FlipVertical = 4,
    /// Mirrored, then a quarter turn clockwise.
    Transpose = 5,
    /// A quarter turn clockwise.
    Rotate90CW = 6,
    /// Mirrored, then a quarter turn counterclockwise.
    Transverse = 7,
    /// A quarter turn counterclockwise.
    Rotate270CW = 8,
}

impl Orientation {
    /// Whether correcting this orientation swaps width and height.
    ///
    /// Cut positions refer to the image as displayed, so decoding applies
    /// any quarter-turn before the rest of the crate sees the raster.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90CW | Self::Transverse | Self::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90CW,
            7 => Self::Transverse,
            8 => Self::Rotate270CW,
            _ => Self::Normal,
        }
    }
}
