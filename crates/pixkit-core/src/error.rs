//! Error type shared by every engine operation.

use thiserror::Error;

/// Errors reported by pixel buffers, image sources and packers.
///
/// Every validation failure aborts the whole operation; no partially
/// initialized object is ever handed back alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The input byte buffer was empty.
    #[error("Empty input buffer")]
    EmptyInput,

    /// The container signature or requested pixel/MIME format is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The readable handle is negative, closed or otherwise unusable.
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Width or height is zero or negative.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    /// Frame index is negative or not below the frame count.
    #[error("Invalid frame index {index} (frame count {frame_count})")]
    InvalidIndex { index: i64, frame_count: u32 },

    /// Sample size must be strictly positive.
    #[error("Invalid sample size: {0}")]
    InvalidSampleSize(i32),

    /// Rotation angle is NaN or infinite.
    #[error("Invalid rotation angle")]
    InvalidRotation,

    /// Decode region does not fit inside the frame.
    #[error("Region {width}x{height}+{x}+{y} exceeds frame bounds {frame_width}x{frame_height}")]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        frame_width: u32,
        frame_height: u32,
    },

    /// Buffer IO window does not fit the caller buffer or the pixel buffer.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Write attempted on a buffer created with `editable == false`.
    #[error("Pixel buffer is not editable")]
    NotEditable,

    /// The object was already released.
    #[error("Object has been released")]
    Released,

    /// Metadata tag absent and no default value supplied.
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// Pack options carry no target format.
    #[error("Missing pack format")]
    MissingFormat,

    /// Pack options carry no quality.
    #[error("Missing pack quality")]
    MissingQuality,

    /// Quality is outside `[0, 100]`.
    #[error("Invalid quality {0}: must be within 0..=100")]
    InvalidQuality(i32),

    /// Operation called in the wrong source state.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// Decoded geometry exceeds the configured pixel budget.
    #[error("Resource limit exceeded: {pixels} pixels (limit {limit})")]
    ResourceLimit { pixels: u64, limit: u64 },

    /// The codec rejected structurally corrupt data.
    #[error("Codec error: {0}")]
    Codec(String),

    /// The byte source could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => ImageError::UnsupportedFormat(e.to_string()),
            image::ImageError::IoError(e) => ImageError::Io(e.to_string()),
            other => ImageError::Codec(other.to_string()),
        }
    }
}
