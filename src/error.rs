//! Structured error types for accent-color.
//!
//! Resolution itself never fails outward (it falls back to the default
//! accent), but the individual failure points are still typed so they can be
//! logged and tested.

/// All errors that can occur while resolving colors or loading settings.
#[derive(Debug, thiserror::Error)]
pub enum AccentError {
    /// The color engine could not turn the string into a color, or turned
    /// it into an implausible black.
    #[error("Unrecognized color: {0}")]
    ParseFailure(String),

    /// The engine output did not decompose into exactly three channels.
    #[error("Malformed channel data: {0}")]
    MalformedChannelData(String),

    /// Stored settings were not valid JSON.
    #[error("Settings JSON: {0}")]
    Settings(#[from] serde_json::Error),

    /// A stored settings field had the wrong shape.
    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: String, reason: String },

    /// A view mode tag that is not `source`, `livePreview` or `reading`.
    #[error("Unknown view mode: {0}")]
    UnknownMode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AccentError>;

#[cfg(target_arch = "wasm32")]
impl From<AccentError> for wasm_bindgen::JsValue {
    fn from(e: AccentError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
