//! hookstream - incremental parsing of streamed smart-contract generations
//!
//! A language model streams a mixed response: a conversational reply plus a
//! generated hook contract wrapped in pseudo-XML tags (or, occasionally, a
//! JSON object). This crate turns that fragment stream into a structured
//! [`GenerationRecord`](models::GenerationRecord) as fields complete.
//!
//! - [`extract`] - tag vocabulary and the drain cycle
//! - [`repair`] - JSON fallback with truncation repair
//! - [`parser`] - per-session incremental parser
//! - [`session`] - session state machine and async driver
//! - [`sse`] / [`client`] - transport framing and the HTTP backend client

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod observer;
pub mod parser;
pub mod repair;
pub mod session;
pub mod sse;
pub mod store;

pub use config::SessionConfig;
pub use error::{HookstreamError, HookstreamResult};
pub use models::GenerationRecord;
pub use parser::StreamParser;
pub use session::{SessionOutcome, StreamSession};
