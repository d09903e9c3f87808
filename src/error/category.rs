//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent handling, recovery strategies, and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
///
/// Categories enable consistent:
/// - Retry policies (transient vs. permanent errors)
/// - User messaging (technical vs. user-actionable)
/// - Recovery strategies (automatic vs. manual intervention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, DNS, timeout).
    /// Generally transient and retryable.
    Network,

    /// Backend/model-side errors (error frames, HTTP 5xx).
    /// Generally transient and retryable after delay.
    Server,

    /// Rejected requests and undecodable frames (HTTP 4xx, bad SSE data).
    /// Not retryable without changing the request.
    Client,

    /// Session driven out of order (finalize twice, ingest after finalize).
    /// Not retryable - indicates a programming error.
    Contract,

    /// System/OS errors (filesystem, serialization).
    /// May or may not be retryable depending on specific error.
    System,

    /// Configuration errors (missing or invalid settings).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Contract => "contract",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => {
                "Check your connection to the generation backend and try again"
            }
            ErrorCategory::Server => {
                "The model backend reported a problem. Please retry the request"
            }
            ErrorCategory::Client => {
                "The request was rejected. Check the prompt and model settings"
            }
            ErrorCategory::Contract => "This is a bug in the calling code. Please report it",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check your HOOKSTREAM_* environment settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
