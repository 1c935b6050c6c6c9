//! Image encoding: JPEG and PNG containers behind the `ImagePacker` front end.
//!
//! All operations are synchronous and single-threaded.

mod jpeg;
mod packer;
mod png;

pub use jpeg::encode_jpeg;
pub use packer::{ImagePacker, PackOptions, Packable};
pub use png::encode_png;
