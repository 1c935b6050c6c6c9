//! `ImagePacker` bindings.
//!
//! # Example
//!
//! ```typescript
//! const packer = createImagePacker();
//! const jpeg = packer.packing(source, { format: ["image/jpeg"], quality: 90 });
//! const png = packer.packingPixelMap(map, { format: ["image/png"], quality: 100 });
//! ```

use crate::pixel_map::JsPixelMap;
use crate::source::JsImageSource;
use crate::types::{options_from_js, string_array, to_js};
use pixkit_core::{ImageError, ImagePacker, PackOptions, Packable};
use wasm_bindgen::prelude::*;

/// JPEG/PNG encoder front end.
#[wasm_bindgen(js_name = ImagePacker)]
pub struct JsImagePacker {
    inner: ImagePacker,
}

#[wasm_bindgen(js_name = createImagePacker)]
pub fn create_image_packer() -> JsImagePacker {
    JsImagePacker {
        inner: ImagePacker::new(),
    }
}

#[wasm_bindgen(js_class = ImagePacker)]
impl JsImagePacker {
    /// Encodable MIME types.
    #[wasm_bindgen(getter, js_name = supportedFormats)]
    pub fn supported_formats(&self) -> js_sys::Array {
        string_array(&ImagePacker::supported_formats())
    }

    /// Encode frame 0 of `source`. `options` is `{ format: [mime], quality }`.
    pub fn packing(&self, source: &JsImageSource, options: JsValue) -> Result<Vec<u8>, JsValue> {
        let opts: PackOptions = options_from_js(options)?.unwrap_or_default();
        self.pack(source.inner(), &opts).map_err(to_js)
    }

    /// Encode the current pixels of `map`.
    #[wasm_bindgen(js_name = packingPixelMap)]
    pub fn packing_pixel_map(&self, map: &JsPixelMap, options: JsValue) -> Result<Vec<u8>, JsValue> {
        let opts: PackOptions = options_from_js(options)?.unwrap_or_default();
        self.pack(map.inner(), &opts).map_err(to_js)
    }

    /// Idempotent.
    pub fn release(&mut self) {
        self.inner.release();
    }
}

impl JsImagePacker {
    pub(crate) fn pack<P: Packable + ?Sized>(
        &self,
        source: &P,
        opts: &PackOptions,
    ) -> Result<Vec<u8>, ImageError> {
        self.inner.packing(source, opts)
    }
}
