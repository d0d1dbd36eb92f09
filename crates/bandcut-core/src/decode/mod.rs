//! Image loading pipeline for Bandcut.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, and BMP images from bytes or files
//! - EXIF orientation correction, so cut positions match the displayed image
//! - Image resizing for preview scaling and band shrinking
//!
//! All decoded images are normalized to 8-bit RGB regardless of the source
//! color mode, so the rest of the crate only ever deals with one layout.
//!
//! # Examples
//!
//! ```ignore
//! use bandcut_core::decode::{decode_image, Raster};
//!
//! let bytes = std::fs::read("tall_scan.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod open;
mod resize;
mod types;

pub use open::{decode_image, open_image};
pub use resize::resize;
pub use types::{DecodeError, FilterType, Orientation, Raster};
