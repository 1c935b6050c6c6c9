//! Image rotation with bilinear and Lanczos3 interpolation.
//!
//! Right-angle rotations are exact pixel permutations. Any other angle uses
//! inverse mapping: for each pixel in the output image we find which source
//! pixel(s) contribute to it and interpolate their values. Uncovered corners
//! of the expanded canvas are fully transparent.
//!
//! For a clockwise rotation by angle θ (y axis pointing down), the inverse
//! transform is:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + src_cx
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + src_cy
//! ```

use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Tolerance, in degrees, for treating an angle as a right angle.
const ANGLE_EPSILON: f64 = 0.001;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// Normalize a rotation angle to `[0, 360)`.
///
/// # Errors
///
/// Returns `ImageError::InvalidRotation` for NaN or infinite input.
pub fn normalize_angle(angle_degrees: f64) -> Result<f64, ImageError> {
    if !angle_degrees.is_finite() {
        return Err(ImageError::InvalidRotation);
    }
    let normalized = angle_degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 - ANGLE_EPSILON {
        return Ok(0.0);
    }
    Ok(normalized)
}

/// Right-angle class of a normalized angle, if it is one.
fn right_angle(normalized: f64) -> Option<u32> {
    [0u32, 90, 180, 270]
        .into_iter()
        .find(|quarter| (normalized - *quarter as f64).abs() < ANGLE_EPSILON)
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// Right angles are exact: 90 and 270 swap the dimensions, 0 and 180 keep
/// them. Other angles return the smallest canvas containing every corner.
/// Non-finite angles are treated as no rotation.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let Ok(normalized) = normalize_angle(angle_degrees) else {
        return (width, height);
    };

    match right_angle(normalized) {
        Some(0) | Some(180) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = normalized.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise around its center.
///
/// The output canvas is expanded to fit the entire rotated image.
///
/// # Errors
///
/// Returns `ImageError::InvalidRotation` for NaN or infinite angles.
pub fn apply_rotation(
    image: &RgbaImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> Result<RgbaImage, ImageError> {
    let normalized = normalize_angle(angle_degrees)?;

    match right_angle(normalized) {
        Some(0) => return Ok(image.clone()),
        Some(90) => return Ok(imageops::rotate90(image)),
        Some(180) => return Ok(imageops::rotate180(image)),
        Some(270) => return Ok(imageops::rotate270(image)),
        _ => {}
    }

    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), normalized);

    let angle_rad = normalized.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let output = RgbaImage::from_fn(dst_w, dst_h, |dst_x, dst_y| {
        // Sample at pixel centers
        let dx = dst_x as f64 + 0.5 - dst_cx;
        let dy = dst_y as f64 + 0.5 - dst_cy;

        let src_x = dx * cos + dy * sin + src_cx - 0.5;
        let src_y = -dx * sin + dy * cos + src_cy - 0.5;

        match filter {
            InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
            InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
        }
    });

    log::debug!(
        "rotated {}x{} by {:.3} degrees to {}x{}",
        image.width(),
        image.height(),
        normalized,
        dst_w,
        dst_h
    );

    Ok(output)
}

#[inline]
fn get_pixel_f64(image: &RgbaImage, px: u32, py: u32) -> [f64; 4] {
    let p = image.get_pixel(px, py).0;
    [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
}

/// Sample a pixel using bilinear interpolation.
///
/// Coordinates outside the source produce a transparent pixel.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (image.width() as f64, image.height() as f64);

    if x < -0.5 || x > w - 0.5 || y < -0.5 || y > h - 0.5 {
        return Rgba([0, 0, 0, 0]);
    }

    // Clamp into the last full cell so edge pixels are still covered
    let x = x.clamp(0.0, (w - 1.0).max(0.0));
    let y = y.clamp(0.0, (h - 1.0).max(0.0));

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Rgba(result)
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighborhood.
///
/// Falls back to bilinear near the edges where the kernel does not fit.
fn sample_lanczos3(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (image.width() as i64, image.height() as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
                let pixel = get_pixel_f64(image, px as u32, py as u32);
                for i in 0..4 {
                    sum[i] += pixel[i] * weight;
                }
                weight_sum += weight;
            }
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for i in 0..4 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    Rgba(result)
}

/// Lanczos kernel: `sinc(x) * sinc(x/a)` for `|x| < a`, else 0.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
