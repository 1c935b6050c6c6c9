//! Geometry types shared by buffers, sources and decode options.

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Image dimensions in pixels.
///
/// Signed so that caller-supplied negative values survive until the boundary
/// that consumes them can reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns true when both dimensions are strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Validate and convert to unsigned `(width, height)`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidDimensions` if either side is zero or negative.
    pub fn to_dimensions(self) -> Result<(u32, u32), ImageError> {
        if !self.is_valid() {
            return Err(ImageError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok((self.width as u32, self.height as u32))
    }

    /// Build a size from decoder-reported unsigned dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    /// Number of pixels covered by this size (zero for invalid sizes).
    pub fn area(&self) -> u64 {
        if self.is_valid() {
            self.width as u64 * self.height as u64
        } else {
            0
        }
    }
}

/// A rectangular window at `(x, y)` with the given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub size: Size,
    pub x: i32,
    pub y: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            x,
            y,
        }
    }

    /// Region covering a whole `width x height` owner.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            size: Size::from_dimensions(width, height),
            x: 0,
            y: 0,
        }
    }

    /// Check the region against an owner of `owner_width x owner_height`.
    ///
    /// Requires a positive size, non-negative origin and the far edges inside
    /// the owner. Nothing is clamped.
    pub fn fits_within(&self, owner_width: u32, owner_height: u32) -> bool {
        if !self.size.is_valid() || self.x < 0 || self.y < 0 {
            return false;
        }
        let right = self.x as u64 + self.size.width as u64;
        let bottom = self.y as u64 + self.size.height as u64;
        right <= owner_width as u64 && bottom <= owner_height as u64
    }
}

/// Geometry reported for a source frame or a decoded pixel map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageInfo {
    pub size: Size,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::from_dimensions(width, height),
        }
    }
}
