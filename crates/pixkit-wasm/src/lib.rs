//! Pixkit WASM - WebAssembly bindings for the pixkit image engine
//!
//! This crate exposes pixkit-core to JavaScript/TypeScript. It adds no
//! semantics of its own: option objects are deserialized with
//! `serde-wasm-bindgen` and core errors become rejected values.
//!
//! # Module Structure
//!
//! - `source` - `ImageSource` and the `createImageSource` family
//! - `pixel_map` - `PixelMap` and `createPixelMap`
//! - `packer` - `ImagePacker` and `createImagePacker`
//! - `types` - JsValue conversions shared by the bindings
//! - `logging` - console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { createImageSource, createImagePacker } from '@pixkit/wasm';
//!
//! await init();
//!
//! const source = createImageSource(new Uint8Array(await file.arrayBuffer()));
//! const map = source.createPixelMap({ desiredSize: { width: 256, height: 0 } });
//! const jpeg = createImagePacker().packingPixelMap(map, { format: ["image/jpeg"], quality: 90 });
//! ```

use wasm_bindgen::prelude::*;

mod logging;
mod packer;
mod pixel_map;
mod source;
mod types;

pub use packer::{create_image_packer, JsImagePacker};
pub use pixel_map::{create_pixel_map, JsPixelMap};
pub use source::{
    create_image_source, create_image_source_with_config, create_incremental_source,
    JsImageSource,
};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
