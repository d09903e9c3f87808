//! Debug events broadcast over a tokio channel.
//!
//! A `ChannelObserver` turns lifecycle callbacks into serialisable
//! [`DebugEvent`]s for external dashboards. Sending never blocks and a
//! missing receiver is not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::SessionObserver;
use crate::error::{ContractViolation, StreamError};
use crate::models::RecordField;
use crate::session::{SessionOutcome, SessionState};

/// Type alias for the debug event sender.
pub type DebugEventSender = broadcast::Sender<DebugEvent>;

/// Create a new debug event channel with the specified capacity.
pub fn create_debug_channel(
    capacity: usize,
) -> (DebugEventSender, broadcast::Receiver<DebugEvent>) {
    broadcast::channel(capacity)
}

/// One debug event with common metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugEvent {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    pub session_id: Uuid,
    pub event: DebugEventKind,
}

impl DebugEvent {
    pub fn new(session_id: Uuid, event: DebugEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id,
            event,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebugEventKind {
    /// Session moved between lifecycle states
    Lifecycle(LifecycleData),
    /// A fragment finished ingesting
    Ingest(IngestData),
    /// A record field was set or changed
    Field(FieldData),
    /// Stream error or contract violation
    Error(ErrorData),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleData {
    pub phase: SessionPhase,
    pub state: SessionState,
    pub details: Option<String>,
}

/// Coarse phases surfaced to dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Started,
    StateChanged,
    Completed,
    Failed,
    Incomplete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestData {
    pub progress: u8,
    pub changed: Vec<RecordField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldData {
    pub field: RecordField,
    /// Code length, set only for `code`
    pub code_len: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    pub code: String,
    pub message: String,
    pub source: ErrorSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    /// Error frame or transport failure
    Stream,
    /// Caller drove the session out of order
    Contract,
}

/// Publishes [`DebugEvent`]s for each lifecycle callback.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: DebugEventSender,
}

impl ChannelObserver {
    pub fn new(tx: DebugEventSender) -> Self {
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DebugEvent> {
        self.tx.subscribe()
    }

    fn emit(&self, session: Uuid, event: DebugEventKind) {
        // No receivers is fine.
        let _ = self.tx.send(DebugEvent::new(session, event));
    }
}

impl SessionObserver for ChannelObserver {
    fn on_state_change(&self, session: Uuid, from: SessionState, to: SessionState) {
        let phase = if from == SessionState::Idle {
            SessionPhase::Started
        } else {
            SessionPhase::StateChanged
        };
        self.emit(
            session,
            DebugEventKind::Lifecycle(LifecycleData {
                phase,
                state: to,
                details: Some(format!("{} -> {}", from, to)),
            }),
        );
    }

    fn on_ingest_end(&self, session: Uuid, progress: u8, changed: &[RecordField]) {
        self.emit(
            session,
            DebugEventKind::Ingest(IngestData {
                progress,
                changed: changed.to_vec(),
            }),
        );
    }

    fn on_field_discovered(&self, session: Uuid, field: RecordField) {
        if field == RecordField::Code {
            // Reported with its length by on_code_available.
            return;
        }
        self.emit(
            session,
            DebugEventKind::Field(FieldData {
                field,
                code_len: None,
            }),
        );
    }

    fn on_code_available(&self, session: Uuid, code: &str) {
        self.emit(
            session,
            DebugEventKind::Field(FieldData {
                field: RecordField::Code,
                code_len: Some(code.len()),
            }),
        );
    }

    fn on_finalize(&self, session: Uuid, outcome: &SessionOutcome) {
        let (phase, state, details) = match outcome {
            SessionOutcome::Completed(result) => (
                SessionPhase::Completed,
                SessionState::Done,
                result.record.name.clone(),
            ),
            SessionOutcome::Failed { error, .. } => (
                SessionPhase::Failed,
                SessionState::Errored,
                Some(error.to_string()),
            ),
            SessionOutcome::Incomplete { reason, .. } => (
                SessionPhase::Incomplete,
                SessionState::Aborted,
                Some(reason.to_string()),
            ),
        };
        self.emit(
            session,
            DebugEventKind::Lifecycle(LifecycleData {
                phase,
                state,
                details,
            }),
        );
    }

    fn on_error(&self, session: Uuid, error: &StreamError) {
        self.emit(
            session,
            DebugEventKind::Error(ErrorData {
                code: error.error_code().to_string(),
                message: error.to_string(),
                source: ErrorSource::Stream,
            }),
        );
    }

    fn on_contract_violation(&self, session: Uuid, violation: &ContractViolation) {
        self.emit(
            session,
            DebugEventKind::Error(ErrorData {
                code: violation.error_code().to_string(),
                message: violation.to_string(),
                source: ErrorSource::Contract,
            }),
        );
    }
}
