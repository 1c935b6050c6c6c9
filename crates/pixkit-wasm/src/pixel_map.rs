//! `PixelMap` bindings.
//!
//! # Example
//!
//! ```typescript
//! const map = createPixelMap(colors, { editable: true, pixelFormat: 3, size: { width: 6, height: 4 } });
//! const row = map.getBytesNumberPerRow();
//! map.writePixels(bytes, 0, 8, { size: { width: 2, height: 1 }, x: 0, y: 0 });
//! ```

use crate::types::{required_from_js, to_js, to_js_value};
use pixkit_core::{ImageError, InitializationOptions, PixelMap, PositionArea, Region};
use wasm_bindgen::prelude::*;

/// A decoded bitmap living in WASM memory.
#[wasm_bindgen(js_name = PixelMap)]
pub struct JsPixelMap {
    inner: PixelMap,
}

/// Build a pixel map from raw pixels and `InitializationOptions`.
#[wasm_bindgen(js_name = createPixelMap)]
pub fn create_pixel_map(colors: &[u8], options: JsValue) -> Result<JsPixelMap, JsValue> {
    let opts: InitializationOptions = required_from_js(options, "initialization options")?;
    JsPixelMap::create(colors, &opts).map_err(to_js)
}

#[wasm_bindgen(js_class = PixelMap)]
impl JsPixelMap {
    /// `{ size: { width, height } }`
    #[wasm_bindgen(js_name = getImageInfo)]
    pub fn get_image_info(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.image_info().map_err(to_js)?)
    }

    #[wasm_bindgen(js_name = getBytesNumberPerRow)]
    pub fn get_bytes_number_per_row(&self) -> Result<u32, JsValue> {
        self.inner.bytes_number_per_row().map_err(to_js)
    }

    #[wasm_bindgen(js_name = getPixelBytesNumber)]
    pub fn get_pixel_bytes_number(&self) -> Result<u32, JsValue> {
        self.inner.pixel_bytes_number().map_err(to_js)
    }

    #[wasm_bindgen(getter, js_name = isEditable)]
    pub fn is_editable(&self) -> bool {
        self.inner.is_editable()
    }

    /// Numeric pixel format code.
    #[wasm_bindgen(getter, js_name = pixelFormat)]
    pub fn pixel_format(&self) -> i32 {
        self.inner.pixel_format().into()
    }

    /// Copy every pixel into `dst`; an empty `dst` is a no-op.
    #[wasm_bindgen(js_name = readPixelsToBuffer)]
    pub fn read_pixels_to_buffer(&self, dst: &mut [u8]) -> Result<(), JsValue> {
        self.inner.read_pixels_to_buffer(dst).map_err(to_js)
    }

    /// Read `region` into `pixels` starting at `offset`, rows `stride` apart.
    #[wasm_bindgen(js_name = readPixels)]
    pub fn read_pixels(
        &self,
        pixels: &mut [u8],
        offset: u32,
        stride: u32,
        region: JsValue,
    ) -> Result<(), JsValue> {
        let region: Region = required_from_js(region, "region")?;
        self.read_region(pixels, offset, stride, region).map_err(to_js)
    }

    /// Write `pixels` into `region`; mirror of `readPixels`.
    #[wasm_bindgen(js_name = writePixels)]
    pub fn write_pixels(
        &mut self,
        pixels: &[u8],
        offset: u32,
        stride: u32,
        region: JsValue,
    ) -> Result<(), JsValue> {
        let region: Region = required_from_js(region, "region")?;
        self.write_region(pixels, offset, stride, region).map_err(to_js)
    }

    #[wasm_bindgen(js_name = writeBufferToPixels)]
    pub fn write_buffer_to_pixels(&mut self, src: &[u8]) -> Result<(), JsValue> {
        self.inner.write_buffer_to_pixels(src).map_err(to_js)
    }

    /// Free the pixels now rather than at finalization. Idempotent.
    pub fn release(&mut self) {
        self.inner.release();
    }
}

impl JsPixelMap {
    pub(crate) fn create(colors: &[u8], opts: &InitializationOptions) -> Result<Self, ImageError> {
        PixelMap::create(colors, opts).map(Self::from_core)
    }

    pub(crate) fn from_core(inner: PixelMap) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &PixelMap {
        &self.inner
    }

    pub(crate) fn read_region(
        &self,
        pixels: &mut [u8],
        offset: u32,
        stride: u32,
        region: Region,
    ) -> Result<(), ImageError> {
        let mut area = PositionArea {
            pixels: pixels.to_vec(),
            offset,
            stride,
            region,
        };
        self.inner.read_pixels(&mut area)?;
        pixels.copy_from_slice(&area.pixels);
        Ok(())
    }

    pub(crate) fn write_region(
        &mut self,
        pixels: &[u8],
        offset: u32,
        stride: u32,
        region: Region,
    ) -> Result<(), ImageError> {
        let area = PositionArea {
            pixels: pixels.to_vec(),
            offset,
            stride,
            region,
        };
        self.inner.write_pixels(&area)
    }
}
