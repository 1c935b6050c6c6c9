//! JPEG encoding.
//!
//! JPEG has no alpha channel, so RGBA input is flattened to RGB by dropping
//! alpha before it reaches the encoder.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::io::Cursor;

use crate::error::ImageError;

/// Encode an RGBA image to JPEG bytes.
///
/// `quality` is clamped to the encoder's range of 1-100, so 0 encodes at
/// the lowest quality rather than failing.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-90: Good to medium quality
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions {
            width: width as i32,
            height: height as i32,
        });
    }

    let quality = quality.clamp(1, 100);

    let rgb: Vec<u8> = image
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ImageError::Codec(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]))
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg_bytes = encode_jpeg(&gray(100, 100), 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        assert!(encode_jpeg(&gray(10, 10), 0).is_ok());
        assert!(encode_jpeg(&gray(10, 10), 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let transparent = RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 0]));
        let bytes = encode_jpeg(&transparent, 95).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
        let p = decoded.get_pixel(4, 4);
        assert!(p[0] > 150, "red channel was {}", p[0]);
    }

    #[test]
    fn test_encode_jpeg_zero_size() {
        assert!(matches!(
            encode_jpeg(&RgbaImage::new(0, 10), 90),
            Err(ImageError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_non_square() {
        assert!(encode_jpeg(&gray(200, 50), 90).is_ok());
        assert!(encode_jpeg(&gray(50, 200), 90).is_ok());
    }
}
