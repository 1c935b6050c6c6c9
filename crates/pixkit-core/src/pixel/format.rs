//! Pixel format tags and conversions between them.

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Numeric code of the declared-but-unsupported 8-bit alpha format.
pub const ALPHA_8_CODE: i32 = 1;

/// Pixel layout of a buffer.
///
/// Numeric codes: `0 = Unknown`, `2 = RGB_565`, `3 = RGBA_8888`. Every other
/// code (including `1 = ALPHA_8`) is carried as `Unsupported(code)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PixelFormat {
    /// No explicit format requested; resolves to `Rgba8888`.
    #[default]
    Unknown,
    /// 16-bit packed RGB, stored little-endian (2 bytes per pixel).
    Rgb565,
    /// 8-bit RGBA (4 bytes per pixel).
    Rgba8888,
    /// A valid enum code that no buffer can hold.
    Unsupported(i32),
}

impl PixelFormat {
    /// Bytes per pixel for formats a buffer can hold.
    #[inline]
    pub fn bytes_per_pixel(self) -> Option<u32> {
        match self {
            PixelFormat::Rgb565 => Some(2),
            PixelFormat::Rgba8888 => Some(4),
            PixelFormat::Unknown | PixelFormat::Unsupported(_) => None,
        }
    }

    /// Resolve to a concrete, supported format.
    ///
    /// `Unknown` becomes the default `Rgba8888`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedFormat` for `Unsupported(_)`.
    pub fn resolve(self) -> Result<PixelFormat, ImageError> {
        match self {
            PixelFormat::Unknown => Ok(PixelFormat::Rgba8888),
            PixelFormat::Rgb565 | PixelFormat::Rgba8888 => Ok(self),
            PixelFormat::Unsupported(code) => Err(ImageError::UnsupportedFormat(format!(
                "pixel format code {}",
                code
            ))),
        }
    }

    /// Convert tightly packed RGBA8 samples into this format.
    ///
    /// `self` must already be resolved.
    pub(crate) fn pack_rgba(self, rgba: &[u8]) -> Vec<u8> {
        match self {
            PixelFormat::Rgb565 => rgba_to_rgb565(rgba),
            _ => rgba.to_vec(),
        }
    }

    /// Expand tightly packed samples of this format into RGBA8.
    pub(crate) fn unpack_rgba(self, data: &[u8]) -> Vec<u8> {
        match self {
            PixelFormat::Rgb565 => rgb565_to_rgba(data),
            _ => data.to_vec(),
        }
    }
}

impl From<i32> for PixelFormat {
    fn from(code: i32) -> Self {
        match code {
            0 => PixelFormat::Unknown,
            2 => PixelFormat::Rgb565,
            3 => PixelFormat::Rgba8888,
            other => PixelFormat::Unsupported(other),
        }
    }
}

impl From<PixelFormat> for i32 {
    fn from(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Unknown => 0,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgba8888 => 3,
            PixelFormat::Unsupported(code) => code,
        }
    }
}

fn rgba_to_rgb565(rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgba.len() / 2);
    for px in rgba.chunks_exact(4) {
        let r = (px[0] as u16 >> 3) << 11;
        let g = (px[1] as u16 >> 2) << 5;
        let b = px[2] as u16 >> 3;
        out.extend_from_slice(&(r | g | b).to_le_bytes());
    }
    out
}

fn rgb565_to_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 2);
    for px in data.chunks_exact(2) {
        let v = u16::from_le_bytes([px[0], px[1]]);
        let r = ((v >> 11) & 0x1F) as u8;
        let g = ((v >> 5) & 0x3F) as u8;
        let b = (v & 0x1F) as u8;
        // Replicate high bits into the low bits so 0x1F maps to 0xFF
        out.push((r << 3) | (r >> 2));
        out.push((g << 2) | (g >> 4));
        out.push((b << 3) | (b >> 2));
        out.push(255);
    }
    out
}
