//! Unified error type for hookstream.
//!
//! `HookstreamError` consolidates the domain-specific errors so callers get
//! one categorization, retry policy, and user message surface.

use thiserror::Error;

use super::category::ErrorCategory;
use super::client::ClientError;
use super::config::ConfigError;
use super::contract::ContractViolation;
use super::stream::StreamError;

#[derive(Debug, Error)]
pub enum HookstreamError {
    /// Transport-level stream failure.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Session driven out of order by the caller.
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// HTTP collaborator failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Filesystem failure (result store).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// (De)serialization failure (result store, CLI output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HookstreamError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            HookstreamError::Stream(err) => match err {
                StreamError::Backend { .. } => ErrorCategory::Server,
                StreamError::InvalidFrame { .. } => ErrorCategory::Client,
                StreamError::ConnectionLost { .. }
                | StreamError::EndedWithoutTerminal
                | StreamError::Cancelled { .. } => ErrorCategory::Network,
            },
            HookstreamError::Contract(_) => ErrorCategory::Contract,
            HookstreamError::Client(err) => match err {
                ClientError::Http(_) => ErrorCategory::Network,
                ClientError::ServerError { status, .. } if *status >= 500 => {
                    ErrorCategory::Server
                }
                ClientError::ServerError { .. } | ClientError::Frame(_) => ErrorCategory::Client,
            },
            HookstreamError::Config(_) => ErrorCategory::Configuration,
            HookstreamError::Io(_) | HookstreamError::Json(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            HookstreamError::Stream(err) => err.is_retryable(),
            HookstreamError::Client(err) => err.is_retryable(),
            HookstreamError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::Interrupted | std::io::ErrorKind::WouldBlock
            ),
            HookstreamError::Contract(_)
            | HookstreamError::Config(_)
            | HookstreamError::Json(_) => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            HookstreamError::Stream(err) => err.error_code(),
            HookstreamError::Contract(err) => err.error_code(),
            HookstreamError::Client(err) => err.error_code(),
            HookstreamError::Config(_) => "E_CONFIG",
            HookstreamError::Io(_) => "E_SYS_IO",
            HookstreamError::Json(_) => "E_SYS_JSON",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            HookstreamError::Stream(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}
