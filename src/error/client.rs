//! HTTP client errors for the generation backend.

use thiserror::Error;

use super::stream::StreamError;
use crate::sse::FrameParseError;

/// Error type for generation client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// A frame in the event stream could not be decoded
    #[error("Frame decode error: {0}")]
    Frame(#[from] FrameParseError),
}

impl ClientError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_connect() || e.is_timeout() || e.is_body(),
            ClientError::ServerError { status, .. } => *status == 429 || *status >= 500,
            ClientError::Frame(_) => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Http(e) if e.is_timeout() => "E_NET_TIMEOUT",
            ClientError::Http(e) if e.is_connect() => "E_NET_CONN",
            ClientError::Http(_) => "E_NET_HTTP",
            ClientError::ServerError { .. } => "E_NET_STATUS",
            ClientError::Frame(_) => "E_NET_FRAME",
        }
    }
}

/// Errors surfacing mid-stream become transport failures of the session.
impl From<ClientError> for StreamError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Frame(e) => StreamError::InvalidFrame {
                message: e.to_string(),
            },
            other => StreamError::ConnectionLost {
                message: other.to_string(),
            },
        }
    }
}
