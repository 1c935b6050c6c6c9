//! `ImageSource` bindings.
//!
//! # Example
//!
//! ```typescript
//! const source = createImageSource(new Uint8Array(await file.arrayBuffer()));
//! const info = source.getImageInfo(0);
//! const map = source.createPixelMap({ rotate: 90, editable: true });
//!
//! const incremental = createIncrementalSource(new Uint8Array(1));
//! incremental.updateData(bytes, true, 0, bytes.length);
//! ```

use crate::pixel_map::JsPixelMap;
use crate::types::{options_from_js, string_array, to_js, to_js_value};
use pixkit_core::{DecodeOptions, EngineConfig, ImageError, ImageSource, PropertyOptions};
use wasm_bindgen::prelude::*;

/// An encoded image opened for inspection and decoding.
#[wasm_bindgen(js_name = ImageSource)]
pub struct JsImageSource {
    inner: ImageSource,
}

/// Open a complete JPEG, PNG, BMP or GIF buffer.
#[wasm_bindgen(js_name = createImageSource)]
pub fn create_image_source(bytes: &[u8]) -> Result<JsImageSource, JsValue> {
    JsImageSource::from_bytes(bytes, EngineConfig::default()).map_err(to_js)
}

/// Open a buffer with explicit engine configuration.
#[wasm_bindgen(js_name = createImageSourceWithConfig)]
pub fn create_image_source_with_config(
    bytes: &[u8],
    config: JsValue,
) -> Result<JsImageSource, JsValue> {
    let config: EngineConfig = options_from_js(config)?.unwrap_or_default();
    JsImageSource::from_bytes(bytes, config).map_err(to_js)
}

/// Start a source that is fed with `updateData`. `seed` only sizes the buffer.
#[wasm_bindgen(js_name = createIncrementalSource)]
pub fn create_incremental_source(seed: &[u8]) -> JsImageSource {
    JsImageSource {
        inner: ImageSource::create_incremental(seed),
    }
}

#[wasm_bindgen(js_class = ImageSource)]
impl JsImageSource {
    /// Decodable MIME types.
    #[wasm_bindgen(js_name = supportedFormats)]
    pub fn supported_formats() -> js_sys::Array {
        string_array(&ImageSource::supported_formats())
    }

    /// Append `chunk[offset..offset + length]`; `isFinal` seals the stream.
    #[wasm_bindgen(js_name = updateData)]
    pub fn update_data(
        &mut self,
        chunk: &[u8],
        is_final: bool,
        offset: u32,
        length: u32,
    ) -> Result<bool, JsValue> {
        self.inner
            .update_data(chunk, is_final, offset, length)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = getFrameCount)]
    pub fn get_frame_count(&self) -> Result<u32, JsValue> {
        self.inner.frame_count().map_err(to_js)
    }

    /// Detected MIME type.
    #[wasm_bindgen(js_name = getMimeType)]
    pub fn get_mime_type(&self) -> Result<String, JsValue> {
        self.inner
            .format()
            .map(|f| f.mime_type().to_string())
            .map_err(to_js)
    }

    /// Natural geometry of frame `index` (default 0).
    #[wasm_bindgen(js_name = getImageInfo)]
    pub fn get_image_info(&self, index: Option<i32>) -> Result<JsValue, JsValue> {
        let info = self.inner.image_info(index.unwrap_or(0)).map_err(to_js)?;
        to_js_value(&info)
    }

    /// EXIF property by tag name; `options` is `{ index, defaultValue }`.
    #[wasm_bindgen(js_name = getImageProperty)]
    pub fn get_image_property(&self, key: &str, options: JsValue) -> Result<String, JsValue> {
        let opts: Option<PropertyOptions> = options_from_js(options)?;
        self.inner
            .image_property(key, opts.as_ref())
            .map_err(to_js)
    }

    /// Decode a frame; `options` follows `DecodeOptions` with camelCase keys.
    #[wasm_bindgen(js_name = createPixelMap)]
    pub fn create_pixel_map(&self, options: JsValue) -> Result<JsPixelMap, JsValue> {
        let opts: Option<DecodeOptions> = options_from_js(options)?;
        self.decode(opts.as_ref()).map_err(to_js)
    }

    /// Drop the encoded bytes and metadata. Idempotent.
    pub fn release(&mut self) {
        self.inner.release();
    }
}

impl JsImageSource {
    pub(crate) fn from_bytes(bytes: &[u8], config: EngineConfig) -> Result<Self, ImageError> {
        ImageSource::from_bytes_with_config(bytes, config).map(|inner| Self { inner })
    }

    pub(crate) fn decode(&self, opts: Option<&DecodeOptions>) -> Result<JsPixelMap, ImageError> {
        self.inner.create_pixel_map(opts).map(JsPixelMap::from_core)
    }

    pub(crate) fn inner(&self) -> &ImageSource {
        &self.inner
    }
}


/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(6, 4, image::Rgba([1, 2, 3, 255]));
        let mut cursor = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[wasm_bindgen_test]
    fn test_supported_formats_array() {
        assert_eq!(JsImageSource::supported_formats().length(), 4);
    }

    #[wasm_bindgen_test]
    fn test_create_pixel_map_with_js_options() {
        let source = create_image_source(&png_bytes()).unwrap();
        let opts = serde_wasm_bindgen::to_value(&DecodeOptions {
            sample_size: 2,
            ..DecodeOptions::default()
        })
        .unwrap();
        let map = source.create_pixel_map(opts).unwrap();
        assert_eq!(map.get_pixel_bytes_number().unwrap(), 3 * 2 * 4);

        let default_map = source.create_pixel_map(JsValue::UNDEFINED).unwrap();
        assert_eq!(default_map.get_pixel_bytes_number().unwrap(), 96);
    }

    #[wasm_bindgen_test]
    fn test_property_default_value() {
        let source = create_image_source(&png_bytes()).unwrap();
        let opts = serde_wasm_bindgen::to_value(&PropertyOptions {
            index: 0,
            default_value: Some("9527".to_string()),
        })
        .unwrap();
        assert_eq!(source.get_image_property("Artist", opts).unwrap(), "9527");
        assert!(source
            .get_image_property("Artist", JsValue::UNDEFINED)
            .is_err());
    }

    #[wasm_bindgen_test]
    fn test_empty_buffer_rejected() {
        assert!(create_image_source(&[]).is_err());
    }
}
