//! Pixel-region cropping.
//!
//! Regions are in absolute pixel coordinates with the origin at the top-left
//! corner. Unlike a clamping crop, a region that does not fit is rejected.

use image::{imageops, RgbaImage};

use crate::error::ImageError;
use crate::types::Region;

/// Copy `region` out of `image`.
///
/// # Errors
///
/// Returns `ImageError::RegionOutOfBounds` if the region has a negative
/// origin, a non-positive size, or extends past the image edge.
pub fn apply_crop(image: &RgbaImage, region: &Region) -> Result<RgbaImage, ImageError> {
    let (frame_width, frame_height) = image.dimensions();

    if !region.fits_within(frame_width, frame_height) {
        return Err(ImageError::RegionOutOfBounds {
            x: region.x,
            y: region.y,
            width: region.size.width,
            height: region.size.height,
            frame_width,
            frame_height,
        });
    }

    // fits_within guarantees every component is non-negative
    let (x, y) = (region.x as u32, region.y as u32);
    let (width, height) = (region.size.width as u32, region.size.height as u32);

    if x == 0 && y == 0 && width == frame_width && height == frame_height {
        return Ok(image.clone());
    }

    Ok(imageops::crop_imm(image, x, y, width, height).to_image())
}
