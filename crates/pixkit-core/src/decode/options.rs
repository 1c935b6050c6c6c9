//! Decode request parameters.

use serde::{Deserialize, Serialize};

use crate::pixel::PixelFormat;
use crate::types::{Region, Size};

/// Parameters for turning one frame of a source into a pixel map.
///
/// Every field has a default, so `DecodeOptions::default()` is the plain
/// full-frame decode at natural size, RGBA_8888, no rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecodeOptions {
    /// Keep every n-th pixel in each direction. Must be positive.
    pub sample_size: i32,
    /// Whether the resulting pixel map accepts writes.
    pub editable: bool,
    /// Output size after sampling. A zero component keeps aspect ratio.
    pub desired_size: Option<Size>,
    /// Clockwise rotation in degrees; normalized modulo 360.
    pub rotate: f64,
    pub desired_pixel_format: PixelFormat,
    /// Crop window in natural frame coordinates.
    pub desired_region: Option<Region>,
    /// Frame to decode.
    pub index: i32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            sample_size: 1,
            editable: false,
            desired_size: None,
            rotate: 0.0,
            desired_pixel_format: PixelFormat::Unknown,
            desired_region: None,
            index: 0,
        }
    }
}
