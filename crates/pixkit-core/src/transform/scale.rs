//! Resampling: integer sample-size reduction and `desiredSize` scaling.

use image::{imageops, RgbaImage};

use crate::config::FilterType;
use crate::error::ImageError;
use crate::types::Size;

/// Keep every `sample_size`-th pixel in each direction.
///
/// Output dimensions are `ceil(dim / sample_size)`, so a frame never shrinks
/// below 1x1. A sample size of 1 returns a copy.
pub fn downsample(image: &RgbaImage, sample_size: u32) -> RgbaImage {
    if sample_size <= 1 {
        return image.clone();
    }

    let (src_w, src_h) = image.dimensions();
    let dst_w = src_w.div_ceil(sample_size).max(1);
    let dst_h = src_h.div_ceil(sample_size).max(1);

    RgbaImage::from_fn(dst_w, dst_h, |x, y| {
        let sx = (x * sample_size).min(src_w - 1);
        let sy = (y * sample_size).min(src_h - 1);
        *image.get_pixel(sx, sy)
    })
}

/// Resolve a requested size against the current geometry.
///
/// A zero component is derived from the other one preserving aspect ratio;
/// `0x0` means no scaling and yields `None`.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if either component is negative.
pub fn target_dimensions(
    desired: Size,
    width: u32,
    height: u32,
) -> Result<Option<(u32, u32)>, ImageError> {
    if desired.width < 0 || desired.height < 0 {
        return Err(ImageError::InvalidDimensions {
            width: desired.width,
            height: desired.height,
        });
    }

    let ratio = width as f64 / height.max(1) as f64;
    let target = match (desired.width as u32, desired.height as u32) {
        (0, 0) => return Ok(None),
        (0, h) => (((h as f64) * ratio).round() as u32, h),
        (w, 0) => (w, ((w as f64) / ratio).round() as u32),
        (w, h) => (w, h),
    };

    Ok(Some((target.0.max(1), target.1.max(1))))
}

/// Resize an image to exact dimensions. Upscaling is allowed.
pub fn resize(image: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, filter.to_image_filter())
}
