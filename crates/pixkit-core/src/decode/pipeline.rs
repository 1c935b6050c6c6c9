//! Options validation and the crop / sample / scale / rotate / convert chain.

use super::container::{decode_frame, FrameTable};
use super::DecodeOptions;
use crate::config::EngineConfig;
use crate::error::ImageError;
use crate::format::FormatId;
use crate::pixel::{PixelBuffer, PixelMap};
use crate::transform;

/// Decode one frame of `bytes` into a new pixel map.
///
/// Validation runs before any pixel work, in this order: frame index,
/// sample size, rotation, pixel format, region, requested size, pixel cap.
/// Any failure aborts the whole decode.
pub(crate) fn create_pixel_map(
    bytes: &[u8],
    format: FormatId,
    frames: &FrameTable,
    opts: &DecodeOptions,
    config: &EngineConfig,
) -> Result<PixelMap, ImageError> {
    let (frame_width, frame_height) = frames.get(opts.index as i64)?;

    if opts.sample_size <= 0 {
        return Err(ImageError::InvalidSampleSize(opts.sample_size));
    }
    let sample_size = opts.sample_size as u32;

    let angle = transform::normalize_angle(opts.rotate)?;
    let pixel_format = opts.desired_pixel_format.resolve()?;

    if let Some(region) = &opts.desired_region {
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
    }

    // Predict the output geometry so oversize requests fail before decoding
    let (crop_w, crop_h) = match &opts.desired_region {
        Some(region) => (region.size.width as u32, region.size.height as u32),
        None => (frame_width, frame_height),
    };
    let (sampled_w, sampled_h) = (
        crop_w.div_ceil(sample_size).max(1),
        crop_h.div_ceil(sample_size).max(1),
    );
    let scaled = match opts.desired_size {
        Some(size) => transform::target_dimensions(size, sampled_w, sampled_h)?,
        None => None,
    };
    let (scaled_w, scaled_h) = scaled.unwrap_or((sampled_w, sampled_h));
    config.check_pixels(scaled_w, scaled_h)?;
    let (out_w, out_h) = transform::compute_rotated_bounds(scaled_w, scaled_h, angle);
    config.check_pixels(out_w, out_h)?;

    let mut image = decode_frame(bytes, format, opts.index as usize)?;

    if let Some(region) = &opts.desired_region {
        image = transform::apply_crop(&image, region)?;
    }
    if sample_size > 1 {
        image = transform::downsample(&image, sample_size);
    }
    if let Some((w, h)) = scaled {
        image = transform::resize(&image, w, h, config.scale_filter);
    }
    image = transform::apply_rotation(&image, angle, config.rotate_filter)?;

    let (width, height) = image.dimensions();
    let data = pixel_format.pack_rgba(image.as_raw());
    let buffer = PixelBuffer::from_decoded(pixel_format, width, height, data, opts.editable)?;

    log::info!(
        "decoded {} frame {} to {}x{} {:?}",
        format.mime_type(),
        opts.index,
        width,
        height,
        pixel_format
    );

    Ok(PixelMap::from_buffer(buffer))
}
