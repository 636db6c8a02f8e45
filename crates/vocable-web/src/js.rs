//! Small helpers over raw JavaScript values.

use wasm_bindgen::JsValue;

/// Whether the code runs inside a JavaScript host at all.
///
/// Off wasm32 every imported binding panics, so probes bail out early.
pub(crate) const fn has_js_host() -> bool {
    cfg!(target_arch = "wasm32")
}

/// Read a property off a JS object, tolerating non-objects.
pub(crate) fn property(value: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Best-effort human-readable text for a thrown JS value or error event.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }

    // DOMException and Error carry `message`; error events nest it under `error`.
    let nested = property(value, "error");
    [Some(value), nested.as_ref()]
        .into_iter()
        .flatten()
        .find_map(|v| property(v, "message").and_then(|m| m.as_string()))
        .or_else(|| property(value, "name").and_then(|n| n.as_string()))
        .unwrap_or_else(|| "unknown JavaScript error".to_string())
}
