// Web UI error types

use manualseats_core::{BridgeError, ConfigError, FieldKind};
use wasm_bindgen::{JsCast, JsValue};

/// Web UI specific errors
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("element #{id} not found")]
    MissingElement { id: String },

    #[error("element #{id} cannot be used as a {kind:?} field")]
    UnsupportedField { id: String, kind: FieldKind },

    #[error("could not listen for '{event}': {reason}")]
    Listener { event: String, reason: String },

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Readable message for a value thrown by a browser API
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
