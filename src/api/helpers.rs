//! Shared helpers for the WASM API
//!
//! Serialization, deserialization and error conversion used by every
//! exported method.

use crate::config::EditorConfig;
use crate::error::StyleError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript, logging failures
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript, logging failures
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert an engine error to a JS error value
pub fn to_js_error(context: &str, err: StyleError) -> JsValue {
    let msg = format!("{}: {}", context, err);
    log::warn!("{}", msg);
    JsValue::from_str(&msg)
}

/// Editor config from the constructor argument; `undefined` or `null` give defaults
pub fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    deserialize(value, "Failed to read editor config")
}
