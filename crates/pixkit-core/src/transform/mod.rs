//! Geometry operations applied while building a pixel map.
//!
//! # Transform Order
//!
//! The decode pipeline applies these in a fixed order:
//! 1. Crop to the requested region (natural frame coordinates)
//! 2. Sample-size reduction
//! 3. Scale to the requested size
//! 4. Rotation
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Regions are absolute pixel coordinates
//! - Origin is top-left corner

mod crop;
mod rotation;
mod scale;

pub use crop::apply_crop;
pub use rotation::{apply_rotation, compute_rotated_bounds, normalize_angle, InterpolationFilter};
pub use scale::{downsample, resize, target_dimensions};
