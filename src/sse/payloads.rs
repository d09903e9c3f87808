//! JSON payloads carried in `data:` lines.

use serde::Deserialize;
use serde_json::Value;

/// `{type, content, errorType?}` envelope sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FramePayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// String or object; objects are re-serialized before parsing
    #[serde(default, alias = "data", alias = "text")]
    pub content: Option<Value>,
    #[serde(default, rename = "errorType", alias = "error_type")]
    pub error_type: Option<String>,
    /// Some backends send the error text as `message`
    #[serde(default)]
    pub message: Option<String>,
}

impl FramePayload {
    /// Content as text: strings verbatim, other JSON values serialized.
    pub fn content_text(&self) -> String {
        match &self.content {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
