//! PNG encoding.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::io::Cursor;

use crate::error::ImageError;

/// PNG is lossless; quality only selects how hard the deflater works.
fn compression_for(quality: u8) -> CompressionType {
    match quality {
        0..=33 => CompressionType::Fast,
        34..=66 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode an RGBA image to PNG bytes, alpha preserved.
pub fn encode_png(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions {
            width: width as i32,
            height: height as i32,
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, compression_for(quality), PngFilter::Adaptive);

    encoder
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ImageError::Codec(format!("PNG encoding failed: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_compression_levels() {
        assert!(matches!(compression_for(0), CompressionType::Fast));
        assert!(matches!(compression_for(33), CompressionType::Fast));
        assert!(matches!(compression_for(34), CompressionType::Default));
        assert!(matches!(compression_for(66), CompressionType::Default));
        assert!(matches!(compression_for(67), CompressionType::Best));
        assert!(matches!(compression_for(100), CompressionType::Best));
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let img = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 80, 7, 100]));
        for quality in [0, 50, 100] {
            let bytes = encode_png(&img, quality).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
            let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
            assert_eq!(decoded, img);
        }
    }
}
