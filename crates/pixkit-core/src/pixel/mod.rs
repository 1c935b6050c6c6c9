//! Pixel storage: formats, raw buffers and the `PixelMap` handle.
//!
//! A [`PixelBuffer`] owns tightly packed rows in one of the supported
//! [`PixelFormat`]s and performs all bounds arithmetic. [`PixelMap`] wraps a
//! buffer with the caller-facing operations (info, region IO, release).

mod buffer;
mod format;
mod map;

pub use buffer::{InitializationOptions, PixelBuffer};
pub use format::{PixelFormat, ALPHA_8_CODE};
pub use map::{PixelMap, PositionArea};
