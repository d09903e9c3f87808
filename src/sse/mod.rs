//! SSE framing for the generation stream.
//!
//! SSE format consists of:
//! - `event: <type>` - event type line
//! - `data: <payload>` - data payload line
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! Payloads are `{"type": "data", "content": ...}`,
//! `{"type": "error", "content": ..., "errorType": ...}`, or the literal
//! `[DONE]` sentinel. `event: done` also ends the stream.
//!
//! # Module structure
//! - `events` - Frame and line types
//! - `payloads` - JSON envelope deserialization
//! - `parser` - Line parsing (SseParser, parse_sse_line, parse_frame)
//! - `decoder` - Byte chunk buffering (FrameDecoder)

mod decoder;
mod events;
mod parser;
mod payloads;

pub use decoder::{decode_transcript, FrameDecoder};
pub use events::{FrameParseError, SseLine, StreamFrame};
pub use parser::{parse_frame, parse_sse_line, SseParser, DONE_SENTINEL};
