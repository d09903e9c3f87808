//! Session lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of one streaming session.
///
/// `Idle -> Streaming -> Finalizing -> Done`, with `Errored` reachable from
/// `Streaming` or `Finalizing` and `Aborted` from `Streaming` when the
/// transport stops early. `Done`, `Errored` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Streaming,
    Finalizing,
    Done,
    Errored,
    Aborted,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Done | SessionState::Errored | SessionState::Aborted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Streaming => "streaming",
            SessionState::Finalizing => "finalizing",
            SessionState::Done => "done",
            SessionState::Errored => "errored",
            SessionState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
