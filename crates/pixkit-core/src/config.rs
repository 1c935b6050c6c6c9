//! Engine tunables.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;

/// Filter type for `desiredSize` scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Configuration shared by an image source and the pixel maps it decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Upper bound on `width * height` for any decoded or scaled frame.
    pub max_decoded_pixels: u64,
    /// Filter used when scaling to `desiredSize`.
    pub scale_filter: FilterType,
    /// Filter used for rotations that are not a multiple of 90 degrees.
    pub rotate_filter: InterpolationFilter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_decoded_pixels: 100_000_000,
            scale_filter: FilterType::Bilinear,
            rotate_filter: InterpolationFilter::Bilinear,
        }
    }
}

impl EngineConfig {
    /// Check a pixel count against `max_decoded_pixels`.
    pub(crate) fn check_pixels(&self, width: u32, height: u32) -> Result<(), crate::ImageError> {
        let pixels = width as u64 * height as u64;
        if pixels > self.max_decoded_pixels {
            return Err(crate::ImageError::ResourceLimit {
                pixels,
                limit: self.max_decoded_pixels,
            });
        }
        Ok(())
    }
}
