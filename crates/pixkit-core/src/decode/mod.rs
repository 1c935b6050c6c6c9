//! Frame decoding for JPEG, PNG, BMP and GIF containers.
//!
//! Decoding happens in two phases. [`probe`] runs once when a source becomes
//! ready and records how many frames the container holds and their natural
//! geometry. Each pixel-map request then decodes one frame and runs it
//! through the transform chain (see [`crate::transform`]).
//!
//! All operations are synchronous and single-threaded.

mod container;
mod options;
mod pipeline;

pub use container::{decode_frame, probe, FrameTable};
pub use options::DecodeOptions;
pub(crate) use pipeline::create_pixel_map;
