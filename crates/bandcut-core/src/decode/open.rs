//! Opening images from bytes or disk.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, Raster};

/// Decode an image from raw file bytes.
///
/// The format (PNG, JPEG, or BMP) is sniffed from the content, so file
/// extensions are never trusted. The decoded image is normalized to 8-bit
/// RGB whatever the source color mode, and any EXIF orientation is applied
/// before returning. Row coordinates taken from the result therefore match
/// the image as a viewer would show it.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` when the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    // Orientation comes from EXIF, which is read separately from the image
    // data itself
    let orientation = extract_orientation(bytes);

    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let upright = apply_orientation(decoded, orientation);
    Ok(Raster::from_rgb_image(upright.into_rgb8()))
}

/// Read a file from disk and decode it.
///
/// # Errors
///
/// Returns `DecodeError::IoError` when the file cannot be read, or any
/// error [`decode_image`] produces for its contents.
pub fn open_image(path: &Path) -> Result<Raster, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    decode_image(&bytes)
}

/// Read the EXIF orientation tag, defaulting to `Normal` when the bytes
/// carry no EXIF data or no orientation field.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    exif::Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|data| {
            data.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map_or(Orientation::Normal, Orientation::from)
}

/// Transform a decoded image so it displays upright.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a small gray raster through the crate's own JPEG encoder.
    fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
        let raster = Raster::new(width, height, vec![128u8; (width * height * 3) as usize]);
        crate::encode::encode_jpeg(&raster, 90).unwrap()
    }

    /// Encode a fixture in any format the image crate can write.
    fn encoded_fixture(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    /// A 3x1 strip of distinguishable pixels for orientation checks.
    fn strip() -> DynamicImage {
        let rgb = image::RgbImage::from_raw(3, 1, vec![10, 0, 0, 20, 0, 0, 30, 0, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    #[test]
    fn test_decode_jpeg() {
        let raster = decode_image(&jpeg_fixture(8, 4)).unwrap();

        assert_eq!((raster.width, raster.height), (8, 4));
        assert_eq!(raster.byte_size(), 8 * 4 * 3);
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let raster = decode_image(&encoded_fixture(5, 7, image::ImageFormat::Png)).unwrap();

        assert_eq!((raster.width, raster.height), (5, 7));
        // Row-major: second pixel of the top row is (1, 0)
        assert_eq!(&raster.pixels[0..6], &[0, 0, 128, 1, 0, 128]);
    }

    #[test]
    fn test_decode_bmp() {
        let raster = decode_image(&encoded_fixture(6, 3, image::ImageFormat::Bmp)).unwrap();
        assert_eq!((raster.width, raster.height), (6, 3));
    }

    #[test]
    fn test_decode_garbage_fails() {
        for bytes in [&[][..], &[0x00][..], &[0x12, 0x34, 0x56, 0x78][..]] {
            assert!(decode_image(bytes).is_err(), "decoded {:?}", bytes);
        }
    }

    #[test]
    fn test_decode_truncated_jpeg_fails() {
        let full = jpeg_fixture(16, 16);
        let result = decode_image(&full[..full.len() / 4]);

        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = open_image(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        std::fs::write(&path, encoded_fixture(4, 9, image::ImageFormat::Png)).unwrap();

        let raster = open_image(&path).unwrap();
        assert_eq!((raster.width, raster.height), (4, 9));
    }

    #[test]
    fn test_extract_orientation_defaults_to_normal() {
        // Plain encoder output carries no EXIF; garbage carries nothing at all
        assert_eq!(extract_orientation(&jpeg_fixture(4, 4)), Orientation::Normal);
        assert_eq!(extract_orientation(&[0xDE, 0xAD]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let upright = apply_orientation(strip(), Orientation::Normal).into_rgb8();

        assert_eq!(upright.dimensions(), (3, 1));
        assert_eq!(upright.get_pixel(0, 0).0, [10, 0, 0]);
        assert_eq!(upright.get_pixel(2, 0).0, [30, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_reverses_rows() {
        let flipped = apply_orientation(strip(), Orientation::FlipHorizontal).into_rgb8();

        assert_eq!(flipped.get_pixel(0, 0).0, [30, 0, 0]);
        assert_eq!(flipped.get_pixel(2, 0).0, [10, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate180_reverses_everything() {
        let turned = apply_orientation(strip(), Orientation::Rotate180).into_rgb8();

        assert_eq!(turned.dimensions(), (3, 1));
        assert_eq!(turned.get_pixel(0, 0).0, [30, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_quarter_turn_swaps_dimensions() {
        // A 3x1 strip becomes 1x3, with the left end now at the top
        let turned = apply_orientation(strip(), Orientation::Rotate90CW).into_rgb8();

        assert_eq!(turned.dimensions(), (1, 3));
        assert_eq!(turned.get_pixel(0, 0).0, [10, 0, 0]);
    }
}
