use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::SessionMessage;

/// Request body for the generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    /// The prompt/message to send
    pub prompt: String,
    /// Session ID, also used to correlate log output
    pub session_id: String,
    /// Prior conversation, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<SessionMessage>,
    /// Model name forwarded to the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Create a new GenerateRequest with a fresh session id
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            session_id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            model: None,
            temperature: None,
        }
    }

    /// Use an existing session id (builder pattern)
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Attach conversation history (builder pattern)
    pub fn with_history(mut self, messages: Vec<SessionMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the model name (builder pattern)
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set sampling temperature (builder pattern)
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}
