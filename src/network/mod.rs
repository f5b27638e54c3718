// Re-export network modules
pub mod api_client;
pub mod config;

pub use api_client::ApiClient;
pub use config::{api_config, init_api_config, ApiConfig};

use std::fmt;

use wasm_bindgen::{JsCast, JsValue};

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// fetch() rejected, no window, body could not be read.
    Transport(String),
    /// Non-2xx HTTP status.
    Http { status: u16, status_text: String },
    /// The backend answered `ok: false`.
    Backend(String),
    /// The body was not the JSON shape we expected.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, status_text } if status_text.is_empty() => {
                write!(f, "Request failed with status code {}", status)
            }
            ApiError::Http { status, status_text } => {
                write!(f, "Request failed with status code {} ({})", status, status_text)
            }
            ApiError::Backend(msg) => f.write_str(msg),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        ApiError::Transport(js_error_text(&value))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Best-effort human text for a rejected promise / thrown JS value.
pub(crate) fn js_error_text(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
