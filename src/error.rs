// ============================================================================
// ERRORES - Taxonomía de fallos del cliente del quiosco
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errores del cliente. Ninguno es fatal: se registran y, en el caso del
/// escáner, se muestran en el banner `scan-notice`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KioskError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("No camera available")]
    NoCamera,

    #[error("Scanner error: {0}")]
    Scanner(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for KioskError {
    fn from(value: JsValue) -> Self {
        KioskError::Dom(js_error_text(&value))
    }
}

impl From<KioskError> for JsValue {
    fn from(error: KioskError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// Texto legible de un valor lanzado desde JS (string, Error o cualquier otra cosa)
pub fn js_error_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
