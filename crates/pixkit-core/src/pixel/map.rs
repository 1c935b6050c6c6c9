//! Caller-facing bitmap handle.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::{InitializationOptions, PixelBuffer, PixelFormat};
use crate::error::ImageError;
use crate::types::{ImageInfo, Region};

/// An IO window into a pixel map: caller bytes plus where they map to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionArea {
    /// Caller-owned bytes read into or written from.
    pub pixels: Vec<u8>,
    /// Byte offset of the first region row inside `pixels`.
    pub offset: u32,
    /// Bytes between consecutive region rows inside `pixels`.
    pub stride: u32,
    /// Pixel window inside the map.
    pub region: Region,
}

/// A decoded, in-memory bitmap with a known pixel format and dimensions.
#[derive(Debug, Clone)]
pub struct PixelMap {
    buffer: PixelBuffer,
}

impl PixelMap {
    /// Build a pixel map directly from raw, already-decoded pixels.
    ///
    /// See [`PixelBuffer::create`] for validation rules.
    pub fn create(raw: &[u8], opts: &InitializationOptions) -> Result<Self, ImageError> {
        PixelBuffer::create(raw, opts).map(Self::from_buffer)
    }

    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Geometry of the decoded pixels.
    pub fn image_info(&self) -> Result<ImageInfo, ImageError> {
        self.ensure_live()?;
        Ok(ImageInfo::new(self.buffer.width(), self.buffer.height()))
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.buffer.format()
    }

    pub fn is_editable(&self) -> bool {
        self.buffer.is_editable()
    }

    pub fn is_released(&self) -> bool {
        self.buffer.is_released()
    }

    /// Bytes in one row of pixels.
    pub fn bytes_number_per_row(&self) -> Result<u32, ImageError> {
        self.ensure_live()?;
        Ok(self.buffer.bytes_per_row())
    }

    /// Bytes in the whole pixel array.
    pub fn pixel_bytes_number(&self) -> Result<u32, ImageError> {
        self.ensure_live()?;
        Ok(self.buffer.total_bytes())
    }

    /// Copy every pixel into `dst`; zero-length `dst` is a no-op.
    pub fn read_pixels_to_buffer(&self, dst: &mut [u8]) -> Result<(), ImageError> {
        self.buffer.read_all(dst).map(|_| ())
    }

    /// Fill `area.pixels` from `area.region`.
    pub fn read_pixels(&self, area: &mut PositionArea) -> Result<(), ImageError> {
        self.buffer
            .read_region(&mut area.pixels, area.offset, area.stride, &area.region)
            .map(|_| ())
    }

    /// Copy `area.pixels` into `area.region`.
    pub fn write_pixels(&mut self, area: &PositionArea) -> Result<(), ImageError> {
        self.buffer
            .write_region(&area.pixels, area.offset, area.stride, &area.region)
            .map(|_| ())
    }

    /// Overwrite every pixel from `src`; zero-length `src` is a no-op.
    pub fn write_buffer_to_pixels(&mut self, src: &[u8]) -> Result<(), ImageError> {
        self.buffer.write_all(src).map(|_| ())
    }

    /// Borrow the underlying buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Current pixels as 8-bit RGBA.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, ImageError> {
        self.buffer.to_rgba_image()
    }

    /// Free the pixels. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.buffer.release();
    }

    fn ensure_live(&self) -> Result<(), ImageError> {
        if self.buffer.is_released() {
            return Err(ImageError::Released);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    fn rgba_opts(editable: bool) -> InitializationOptions {
        InitializationOptions {
            editable,
            pixel_format: PixelFormat::Rgba8888,
            size: Size::new(6, 4),
        }
    }

    #[test]
    fn test_create_reports_info() {
        let map = PixelMap::create(&[0u8; 96], &rgba_opts(true)).unwrap();
        assert_eq!(map.image_info().unwrap().size, Size::new(6, 4));
        assert_eq!(map.pixel_bytes_number().unwrap(), 96);
        assert_eq!(map.bytes_number_per_row().unwrap(), 24);
        assert!(map.is_editable());
    }

    #[test]
    fn test_write_pixels_then_read_back() {
        let color: Vec<u8> = (1..=96).collect();
        let mut map = PixelMap::create(&color, &rgba_opts(true)).unwrap();

        let area = PositionArea {
            pixels: vec![1, 2, 3, 4, 5, 6, 7, 8],
            offset: 0,
            stride: 8,
            region: Region::new(0, 0, 2, 1),
        };
        map.write_pixels(&area).unwrap();

        let mut read_area = PositionArea {
            pixels: vec![0; 8],
            ..area.clone()
        };
        map.read_pixels(&mut read_area).unwrap();
        assert_eq!(read_area.pixels, area.pixels);
    }

    #[test]
    fn test_write_buffer_to_pixels_then_read_all() {
        let mut map = PixelMap::create(&[0u8; 96], &rgba_opts(true)).unwrap();
        let src: Vec<u8> = (0..96).map(|i| 95 - i).collect();
        map.write_buffer_to_pixels(&src).unwrap();

        let mut dst = vec![0u8; 96];
        map.read_pixels_to_buffer(&mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_read_only_map_rejects_writes() {
        let mut map = PixelMap::create(&[0u8; 96], &rgba_opts(false)).unwrap();
        assert_eq!(
            map.write_buffer_to_pixels(&[1u8; 96]),
            Err(ImageError::NotEditable)
        );
    }

    #[test]
    fn test_release() {
        let mut map = PixelMap::create(&[0u8; 96], &rgba_opts(true)).unwrap();
        map.release();
        map.release();
        assert!(map.is_released());
        assert_eq!(map.image_info(), Err(ImageError::Released));
        assert_eq!(map.pixel_bytes_number(), Err(ImageError::Released));
    }
}
