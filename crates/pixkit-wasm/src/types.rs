//! Conversions between JavaScript values and the core option types.

use pixkit_core::ImageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Map a core error to the rejection value handed to JavaScript.
pub(crate) fn to_js(err: ImageError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Deserialize an optional options object; `undefined` and `null` mean none.
pub(crate) fn options_from_js<T: DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Deserialize a required options object.
pub(crate) fn required_from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    options_from_js(value)?.ok_or_else(|| JsValue::from_str(&format!("missing {}", what)))
}

pub(crate) fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build a JS array of strings.
pub(crate) fn string_array(items: &[&str]) -> js_sys::Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}
