//! Frame types decoded from the generation event stream.

use std::fmt;

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: done")
    Event(String),
    /// Data payload (e.g., "data: {\"type\": \"data\", ...}")
    Data(String),
    /// Empty line - signals end of event
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// One transport frame as seen by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// Text fragment for the parser.
    Data(String),
    /// Backend-reported failure, fatal to the session.
    Error {
        message: String,
        kind: Option<String>,
    },
    /// Clean end of stream.
    Done,
}

impl StreamFrame {
    pub fn data(content: impl Into<String>) -> Self {
        StreamFrame::Data(content.into())
    }

    pub fn error(message: impl Into<String>, kind: Option<&str>) -> Self {
        StreamFrame::Error {
            message: message.into(),
            kind: kind.map(str::to_string),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamFrame::Data(_))
    }
}

/// Errors that can occur while decoding frames
#[derive(Debug, Clone, PartialEq)]
pub enum FrameParseError {
    /// Data looked like a JSON frame but did not parse
    InvalidJson { source: String },
    /// Frame `type` not recognised
    UnknownFrameType(String),
    /// Frame body was not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for FrameParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameParseError::InvalidJson { source } => {
                write!(f, "Invalid JSON in frame: {}", source)
            }
            FrameParseError::UnknownFrameType(t) => write!(f, "Unknown frame type: {}", t),
            FrameParseError::InvalidUtf8 => write!(f, "Frame is not valid UTF-8"),
        }
    }
}

impl std::error::Error for FrameParseError {}
