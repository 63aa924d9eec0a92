//! Output types from generation responses.

use serde::{Deserialize, Serialize};

/// Supported output types from text-generation backends.
///
/// Ordering suggestions arrive as JSON embedded in text; the engine
/// re-validates the shape before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output, for backends with a native JSON mode.
    Json(serde_json::Value),
}

impl Output {
    /// The text carried by this output, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}
