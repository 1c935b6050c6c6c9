//! `ImagePacker`: option validation and dispatch to the container encoders.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::{encode_jpeg, encode_png};
use crate::error::ImageError;
use crate::format::{self, FormatId};
use crate::pixel::PixelMap;

/// Anything that can hand the packer 8-bit RGBA pixels.
pub trait Packable {
    fn packing_image(&self) -> Result<RgbaImage, ImageError>;
}

impl Packable for PixelMap {
    fn packing_image(&self) -> Result<RgbaImage, ImageError> {
        self.to_rgba_image()
    }
}

/// Encode request. Both fields are required; they are optional here so that
/// a missing field reports its own error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Target MIME types; only the first entry is used.
    pub format: Option<Vec<String>>,
    /// 0-100 inclusive.
    pub quality: Option<i32>,
}

impl PackOptions {
    pub fn new(mime: &str, quality: i32) -> Self {
        Self {
            format: Some(vec![mime.to_string()]),
            quality: Some(quality),
        }
    }

    /// Check the options in order: format, then quality.
    fn validate(&self) -> Result<(FormatId, u8), ImageError> {
        let mime = self
            .format
            .as_ref()
            .and_then(|formats| formats.first())
            .ok_or(ImageError::MissingFormat)?;
        let target = format::encode_format(mime)
            .ok_or_else(|| ImageError::UnsupportedFormat(mime.clone()))?;

        let quality = self.quality.ok_or(ImageError::MissingQuality)?;
        if !(0..=100).contains(&quality) {
            return Err(ImageError::InvalidQuality(quality));
        }

        Ok((target, quality as u8))
    }
}

/// Stateless encoder front end. Holds no pixels between calls.
#[derive(Debug, Default)]
pub struct ImagePacker {
    released: bool,
}

impl ImagePacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodable MIME types.
    pub fn supported_formats() -> Vec<&'static str> {
        format::supported_encode_formats()
    }

    /// Encode `source` according to `opts`.
    ///
    /// # Errors
    ///
    /// - `ImageError::Released` after `release`
    /// - `ImageError::MissingFormat` / `UnsupportedFormat` for the format list
    /// - `ImageError::MissingQuality` / `InvalidQuality` for the quality
    /// - whatever the source reports when producing its pixels
    pub fn packing<P: Packable + ?Sized>(
        &self,
        source: &P,
        opts: &PackOptions,
    ) -> Result<Vec<u8>, ImageError> {
        if self.released {
            return Err(ImageError::Released);
        }

        let (target, quality) = opts.validate()?;
        let image = source.packing_image()?;

        let bytes = match target {
            FormatId::Jpeg => encode_jpeg(&image, quality)?,
            FormatId::Png => encode_png(&image, quality)?,
            other => return Err(ImageError::UnsupportedFormat(other.mime_type().to_string())),
        };

        log::info!(
            "packed {}x{} image as {} ({} bytes, quality {})",
            image.width(),
            image.height(),
            target.mime_type(),
            bytes.len(),
            quality
        );

        Ok(bytes)
    }

    /// Idempotent.
    pub fn release(&mut self) {
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}
