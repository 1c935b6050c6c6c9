//! Owned, format-tagged pixel storage with bounds-checked region IO.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::PixelFormat;
use crate::config::EngineConfig;
use crate::error::ImageError;
use crate::types::{Region, Size};

/// Descriptor for building a buffer from caller-supplied raw pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitializationOptions {
    pub editable: bool,
    pub pixel_format: PixelFormat,
    pub size: Size,
}

/// A contiguous pixel array tagged with format, geometry and an editable flag.
///
/// Row stride is always `bytes_per_pixel(format) * width`; there is no row
/// padding. After `release` every pixel access fails with
/// `ImageError::Released`.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    format: PixelFormat,
    width: u32,
    height: u32,
    row_stride: u32,
    editable: bool,
    data: Option<Vec<u8>>,
}

impl PixelBuffer {
    /// Build a buffer from raw bytes.
    ///
    /// When `raw` is shorter than the computed size the remainder is
    /// zero-filled; when it is longer only the leading bytes are copied.
    ///
    /// # Errors
    ///
    /// - `ImageError::InvalidDimensions` if width or height is not positive
    /// - `ImageError::UnsupportedFormat` if the pixel format is a declared but
    ///   unsupported code (`Unknown` is accepted and resolves to RGBA_8888)
    /// - `ImageError::ResourceLimit` if the size exceeds the default pixel cap
    ///   or the allocation fails
    pub fn create(raw: &[u8], opts: &InitializationOptions) -> Result<Self, ImageError> {
        let (width, height) = opts.size.to_dimensions()?;
        let format = opts.pixel_format.resolve()?;
        let config = EngineConfig::default();
        config.check_pixels(width, height)?;
        let (row_stride, total) = layout(format, width, height)?;

        let mut data = Vec::new();
        data.try_reserve_exact(total)
            .map_err(|_| ImageError::ResourceLimit {
                pixels: width as u64 * height as u64,
                limit: config.max_decoded_pixels,
            })?;
        data.resize(total, 0);
        let copied = raw.len().min(total);
        data[..copied].copy_from_slice(&raw[..copied]);

        log::debug!(
            "created {}x{} pixel buffer ({:?}, {} of {} bytes supplied)",
            width,
            height,
            format,
            raw.len(),
            total
        );

        Ok(Self {
            format,
            width,
            height,
            row_stride,
            editable: opts.editable,
            data: Some(data),
        })
    }

    /// Wrap decoder output whose length already matches the geometry.
    pub(crate) fn from_decoded(
        format: PixelFormat,
        width: u32,
        height: u32,
        data: Vec<u8>,
        editable: bool,
    ) -> Result<Self, ImageError> {
        let (row_stride, total) = layout(format, width, height)?;
        if data.len() != total {
            return Err(ImageError::Codec(format!(
                "decoded {} bytes, expected {}",
                data.len(),
                total
            )));
        }
        Ok(Self {
            format,
            width,
            height,
            row_stride,
            editable,
            data: Some(data),
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::from_dimensions(self.width, self.height)
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_released(&self) -> bool {
        self.data.is_none()
    }

    /// Bytes in one row of pixels.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.row_stride
    }

    /// Bytes in the whole buffer.
    #[inline]
    pub fn total_bytes(&self) -> u32 {
        self.row_stride * self.height
    }

    /// Borrow the pixel bytes.
    pub fn data(&self) -> Result<&[u8], ImageError> {
        self.data.as_deref().ok_or(ImageError::Released)
    }

    /// Copy `region` out of the buffer into `dst`.
    ///
    /// Row `r` of the region lands at `dst[offset + r * stride..]`. Returns the
    /// number of destination bytes spanned, `region.height * stride`.
    ///
    /// # Errors
    ///
    /// - `ImageError::Released` after `release`
    /// - `ImageError::OutOfRange` if the region leaves the buffer, `stride` is
    ///   shorter than one region row, or `offset + height * stride` exceeds
    ///   `dst.len()`
    pub fn read_region(
        &self,
        dst: &mut [u8],
        offset: u32,
        stride: u32,
        region: &Region,
    ) -> Result<usize, ImageError> {
        let data = self.data()?;
        let window = self.window(dst.len(), offset, stride, region)?;

        for row in 0..window.rows {
            let src = window.src_start + row * self.row_stride as usize;
            let dst_start = window.dst_start + row * window.stride;
            dst[dst_start..dst_start + window.row_bytes]
                .copy_from_slice(&data[src..src + window.row_bytes]);
        }
        Ok(window.span)
    }

    /// Copy `src` into `region` of the buffer; mirror of `read_region`.
    ///
    /// # Errors
    ///
    /// As `read_region`, plus `ImageError::NotEditable` when the buffer was
    /// created read-only.
    pub fn write_region(
        &mut self,
        src: &[u8],
        offset: u32,
        stride: u32,
        region: &Region,
    ) -> Result<usize, ImageError> {
        if self.data.is_none() {
            return Err(ImageError::Released);
        }
        if !self.editable {
            return Err(ImageError::NotEditable);
        }
        let window = self.window(src.len(), offset, stride, region)?;
        let row_stride = self.row_stride as usize;
        let data = self.data.as_mut().ok_or(ImageError::Released)?;

        for row in 0..window.rows {
            let dst = window.src_start + row * row_stride;
            let src_start = window.dst_start + row * window.stride;
            data[dst..dst + window.row_bytes]
                .copy_from_slice(&src[src_start..src_start + window.row_bytes]);
        }
        Ok(window.span)
    }

    /// Copy the whole buffer into `dst`.
    ///
    /// A zero-length `dst` is a no-op. Returns the bytes copied.
    pub fn read_all(&self, dst: &mut [u8]) -> Result<usize, ImageError> {
        let data = self.data()?;
        if dst.is_empty() {
            return Ok(0);
        }
        if dst.len() < data.len() {
            return Err(ImageError::OutOfRange(format!(
                "destination holds {} bytes, buffer needs {}",
                dst.len(),
                data.len()
            )));
        }
        dst[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    /// Overwrite the whole buffer from `src`.
    ///
    /// A zero-length `src` is a no-op. Returns the bytes copied.
    pub fn write_all(&mut self, src: &[u8]) -> Result<usize, ImageError> {
        if self.data.is_none() {
            return Err(ImageError::Released);
        }
        if !self.editable {
            return Err(ImageError::NotEditable);
        }
        let data = self.data.as_mut().ok_or(ImageError::Released)?;
        if src.is_empty() {
            return Ok(0);
        }
        if src.len() < data.len() {
            return Err(ImageError::OutOfRange(format!(
                "source holds {} bytes, buffer needs {}",
                src.len(),
                data.len()
            )));
        }
        let total = data.len();
        data.copy_from_slice(&src[..total]);
        Ok(total)
    }

    /// Expand the pixels into an 8-bit RGBA image.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, ImageError> {
        let rgba = self.format.unpack_rgba(self.data()?);
        RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| ImageError::Codec("pixel data does not match geometry".to_string()))
    }

    /// Free the pixel storage. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.data.take().is_some() {
            log::debug!("released {}x{} pixel buffer", self.width, self.height);
        }
    }

    /// Validate an IO window and compute its byte offsets.
    fn window(
        &self,
        caller_len: usize,
        offset: u32,
        stride: u32,
        region: &Region,
    ) -> Result<IoWindow, ImageError> {
        if !region.fits_within(self.width, self.height) {
            return Err(ImageError::OutOfRange(format!(
                "region {}x{}+{}+{} outside {}x{} buffer",
                region.size.width, region.size.height, region.x, region.y, self.width, self.height
            )));
        }

        let bpp = self.row_stride as u64 / self.width as u64;
        let row_bytes = region.size.width as u64 * bpp;
        if (stride as u64) < row_bytes {
            return Err(ImageError::OutOfRange(format!(
                "stride {} shorter than region row of {} bytes",
                stride, row_bytes
            )));
        }

        let span = region.size.height as u64 * stride as u64;
        if offset as u64 + span > caller_len as u64 {
            return Err(ImageError::OutOfRange(format!(
                "offset {} + {} bytes exceeds caller buffer of {}",
                offset, span, caller_len
            )));
        }

        let src_start = region.y as u64 * self.row_stride as u64 + region.x as u64 * bpp;
        Ok(IoWindow {
            rows: region.size.height as usize,
            row_bytes: row_bytes as usize,
            stride: stride as usize,
            src_start: src_start as usize,
            dst_start: offset as usize,
            span: span as usize,
        })
    }
}

/// Byte layout of a validated region transfer.
struct IoWindow {
    rows: usize,
    row_bytes: usize,
    stride: usize,
    /// Offset of the region's first pixel inside the buffer.
    src_start: usize,
    /// Offset of the first row inside the caller's slice.
    dst_start: usize,
    span: usize,
}

/// Row stride and total byte length for a resolved format.
fn layout(format: PixelFormat, width: u32, height: u32) -> Result<(u32, usize), ImageError> {
    let bpp = format
        .bytes_per_pixel()
        .ok_or_else(|| ImageError::UnsupportedFormat(format!("{:?}", format)))?;
    let too_large = || ImageError::InvalidDimensions {
        width: i32::try_from(width).unwrap_or(i32::MAX),
        height: i32::try_from(height).unwrap_or(i32::MAX),
    };
    let row_stride = bpp.checked_mul(width).ok_or_else(too_large)?;
    let total = row_stride.checked_mul(height).ok_or_else(too_large)?;
    Ok((row_stride, total as usize))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
