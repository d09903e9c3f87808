//! Stream session controller.
//!
//! A [`StreamSession`] receives transport frames, feeds data to its own
//! [`StreamParser`](crate::parser::StreamParser), and ends in exactly one
//! [`SessionOutcome`]. Error frames and transport failures end the session
//! in `Errored`; a stream that stops before its terminal marker, or is
//! cancelled, ends in `Aborted` with an `Incomplete` outcome and is never
//! reported as a success.

mod controller;
mod outcome;
mod state;

pub use controller::StreamSession;
pub use outcome::{SessionOutcome, SessionResult, SessionUpdate};
pub use state::SessionState;
