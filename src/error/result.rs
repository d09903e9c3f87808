//! Result type alias for hookstream operations.

use super::hookstream_error::HookstreamError;

/// Type alias for Results using HookstreamError.
pub type HookstreamResult<T> = Result<T, HookstreamError>;
