//! What a session hands back to its consumer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StreamError;
use crate::models::{GenerationRecord, RecordField};

/// Successful end of a session: the finalized record and reply, emitted once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub session_id: Uuid,
    pub record: GenerationRecord,
    pub reply: String,
    pub completed_at: DateTime<Utc>,
}

/// Terminal outcome of a session.
///
/// Only `Completed` carries a finalized record. The other variants carry the
/// best-effort partial record so a consumer can still show what arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionOutcome {
    Completed(SessionResult),
    /// The backend reported an error or the transport failed.
    Failed {
        error: StreamError,
        partial: GenerationRecord,
        reply: String,
    },
    /// The stream stopped before its terminal marker or was cancelled.
    Incomplete {
        reason: StreamError,
        partial: GenerationRecord,
        reply: String,
    },
}

impl SessionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionOutcome::Completed(_))
    }

    /// Finalized record on success, otherwise the partial one.
    pub fn record(&self) -> &GenerationRecord {
        match self {
            SessionOutcome::Completed(result) => &result.record,
            SessionOutcome::Failed { partial, .. } | SessionOutcome::Incomplete { partial, .. } => {
                partial
            }
        }
    }

    pub fn reply(&self) -> &str {
        match self {
            SessionOutcome::Completed(result) => &result.reply,
            SessionOutcome::Failed { reply, .. } | SessionOutcome::Incomplete { reply, .. } => {
                reply
            }
        }
    }

    pub fn error(&self) -> Option<&StreamError> {
        match self {
            SessionOutcome::Completed(_) => None,
            SessionOutcome::Failed { error, .. } => Some(error),
            SessionOutcome::Incomplete { reason, .. } => Some(reason),
        }
    }

    pub fn result(&self) -> Option<&SessionResult> {
        match self {
            SessionOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// Response to one transport frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Data was ingested; the session is still streaming.
    Progress {
        progress: u8,
        changed: Vec<RecordField>,
        /// New code when this frame set or changed it.
        code: Option<String>,
    },
    /// The session reached a terminal state.
    Finished(SessionOutcome),
}

impl SessionUpdate {
    pub fn into_outcome(self) -> Option<SessionOutcome> {
        match self {
            SessionUpdate::Finished(outcome) => Some(outcome),
            SessionUpdate::Progress { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_exposes_partial() {
        let partial = GenerationRecord {
            name: Some("Fee Hook".to_string()),
            ..Default::default()
        };
        let outcome = SessionOutcome::Failed {
            error: StreamError::backend("boom", None),
            partial,
            reply: String::new(),
        };
        assert!(!outcome.is_completed());
        assert_eq!(outcome.record().name.as_deref(), Some("Fee Hook"));
        assert!(outcome.error().is_some());
        assert!(outcome.result().is_none());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = SessionOutcome::Incomplete {
            reason: StreamError::EndedWithoutTerminal,
            partial: GenerationRecord::default(),
            reply: "Hi".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "incomplete");
        assert_eq!(json["reply"], "Hi");
        assert_eq!(json["reason"]["kind"], "ended_without_terminal");
    }
}
