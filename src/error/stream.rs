//! Transport-level stream errors.
//!
//! These are the only failures that end a streaming session from the data
//! side. Malformed tag content or unparseable JSON never shows up here; the
//! parser absorbs those.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreamError {
    /// Backend sent an explicit error frame.
    Backend {
        message: String,
        /// Optional `errorType` tag from the frame.
        error_type: Option<String>,
    },

    /// Transport failed underneath the stream.
    ConnectionLost { message: String },

    /// A frame could not be decoded.
    InvalidFrame { message: String },

    /// The stream closed without the terminal marker.
    EndedWithoutTerminal,

    /// The caller cancelled the session.
    Cancelled { reason: String },
}

impl StreamError {
    pub fn backend(message: impl Into<String>, error_type: Option<String>) -> Self {
        StreamError::Backend {
            message: message.into(),
            error_type,
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StreamError::Cancelled { .. })
    }

    /// True for outcomes where the stream simply stopped early.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            StreamError::EndedWithoutTerminal | StreamError::Cancelled { .. }
        )
    }

    /// Error-kind tag for consumers (`errorType` for backend errors).
    pub fn kind(&self) -> &str {
        match self {
            StreamError::Backend {
                error_type: Some(t),
                ..
            } => t,
            StreamError::Backend { .. } => "backend",
            StreamError::ConnectionLost { .. } => "connection_lost",
            StreamError::InvalidFrame { .. } => "invalid_frame",
            StreamError::EndedWithoutTerminal => "incomplete",
            StreamError::Cancelled { .. } => "cancelled",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Backend { message, .. } => message.clone(),
            StreamError::ConnectionLost { .. } => {
                "Connection to the generation backend was lost.".to_string()
            }
            StreamError::InvalidFrame { .. } => {
                "Received invalid data from the backend. Please try again.".to_string()
            }
            StreamError::EndedWithoutTerminal => {
                "The response ended before it was complete.".to_string()
            }
            StreamError::Cancelled { .. } => "Generation was cancelled.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Backend { .. } => "E_STREAM_BACKEND",
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::InvalidFrame { .. } => "E_STREAM_FRAME",
            StreamError::EndedWithoutTerminal => "E_STREAM_INCOMPLETE",
            StreamError::Cancelled { .. } => "E_STREAM_CANCELLED",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Backend {
                message,
                error_type,
            } => match error_type {
                Some(t) => write!(f, "Backend error [{}]: {}", t, message),
                None => write!(f, "Backend error: {}", message),
            },
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::InvalidFrame { message } => write!(f, "Invalid frame: {}", message),
            StreamError::EndedWithoutTerminal => {
                write!(f, "Stream ended without terminal marker")
            }
            StreamError::Cancelled { reason } => write!(f, "Stream cancelled: {}", reason),
        }
    }
}

impl std::error::Error for StreamError {}
