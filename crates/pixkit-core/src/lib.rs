//! Pixkit Core - image decode/encode engine
//!
//! This crate turns encoded containers (JPEG, PNG, BMP, GIF) into in-memory
//! pixel maps and back into JPEG or PNG bytes. It provides:
//!
//! - [`ImageSource`]: format detection, frame geometry, EXIF properties and
//!   decoding with sample size, scaling, cropping, rotation and pixel-format
//!   conversion, from buffers, readers, paths or incremental chunks
//! - [`PixelMap`]: a decoded bitmap with bounds-checked region IO
//! - [`ImagePacker`]: validated JPEG/PNG encoding of sources and pixel maps
//!
//! The crate logs through the `log` facade and installs no logger.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod metadata;
pub mod pixel;
pub mod source;
pub mod transform;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{EngineConfig, FilterType};
pub use decode::DecodeOptions;
pub use encode::{ImagePacker, PackOptions, Packable};
pub use error::ImageError;
pub use format::FormatId;
pub use metadata::MetadataStore;
pub use pixel::{InitializationOptions, PixelFormat, PixelMap, PositionArea};
pub use source::{ImageSource, PropertyOptions};
pub use transform::InterpolationFilter;
pub use types::{ImageInfo, Region, Size};

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_6x4(editable: bool) -> InitializationOptions {
        InitializationOptions {
            editable,
            pixel_format: PixelFormat::Rgba8888,
            size: Size::new(6, 4),
        }
    }

    #[test]
    fn test_pixel_map_geometry_from_raw() {
        let map = PixelMap::create(&[0u8; 96], &rgba_6x4(true)).unwrap();
        assert_eq!(map.pixel_bytes_number().unwrap(), 96);
        assert_eq!(map.bytes_number_per_row().unwrap(), 24);
    }

    #[test]
    fn test_region_read_with_empty_buffer_fails() {
        let map = PixelMap::create(&[0u8; 96], &rgba_6x4(true)).unwrap();
        let mut area = PositionArea {
            pixels: Vec::new(),
            offset: 0,
            stride: 8,
            region: Region::new(0, 0, 1, 1),
        };
        assert!(matches!(
            map.read_pixels(&mut area),
            Err(ImageError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_decode_then_pack_round_trip() {
        let bytes = test_support::gif(6, 4, 2);
        let source = ImageSource::from_bytes(&bytes).unwrap();
        assert_eq!(source.frame_count().unwrap(), 2);

        let opts = DecodeOptions {
            index: 1,
            rotate: 270.0,
            editable: true,
            ..DecodeOptions::default()
        };
        let mut map = source.create_pixel_map(Some(&opts)).unwrap();
        assert_eq!(map.image_info().unwrap().size, Size::new(4, 6));

        let area = PositionArea {
            pixels: vec![255; 16],
            offset: 0,
            stride: 8,
            region: Region::new(0, 0, 2, 2),
        };
        map.write_pixels(&area).unwrap();

        let packer = ImagePacker::new();
        let png = packer
            .packing(&map, &PackOptions::new("image/png", 100))
            .unwrap();
        let repacked = ImageSource::from_bytes(&png).unwrap();
        assert_eq!(repacked.format().unwrap(), FormatId::Png);

        let decoded = repacked.create_pixel_map(None).unwrap();
        let mut read = PositionArea {
            pixels: vec![0u8; 4],
            offset: 0,
            stride: 4,
            region: Region::new(1, 1, 1, 1),
        };
        decoded.read_pixels(&mut read).unwrap();
        assert_eq!(read.pixels, vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_quality_boundaries_on_source() {
        let source = ImageSource::from_bytes(&test_support::jpeg(6, 4)).unwrap();
        let packer = ImagePacker::new();
        for quality in [0, 100] {
            assert!(packer
                .packing(&source, &PackOptions::new("image/jpeg", quality))
                .is_ok());
        }
        for quality in [-1, 101] {
            assert_eq!(
                packer.packing(&source, &PackOptions::new("image/jpeg", quality)),
                Err(ImageError::InvalidQuality(quality))
            );
        }
    }
}
