//! Passive lifecycle observers for streaming sessions.
//!
//! The controller calls an observer at fixed points (state changes, ingest
//! start and end, field discovery, code availability, finalize, errors).
//! Observers cannot influence parsing; they only watch. Logging and debug
//! dashboards plug in here instead of being inlined in the parser.

mod channel;
mod logging;

pub use channel::{
    create_debug_channel, ChannelObserver, DebugEvent, DebugEventKind, DebugEventSender,
    ErrorData, ErrorSource, FieldData, IngestData, LifecycleData, SessionPhase,
};
pub use logging::TracingObserver;

use uuid::Uuid;

use crate::error::{ContractViolation, StreamError};
use crate::models::RecordField;
use crate::session::{SessionOutcome, SessionState};

/// Callbacks invoked by `StreamSession`. Every method defaults to a no-op.
pub trait SessionObserver: Send + Sync {
    fn on_state_change(&self, _session: Uuid, _from: SessionState, _to: SessionState) {}

    fn on_ingest_start(&self, _session: Uuid, _fragment_len: usize) {}

    fn on_ingest_end(&self, _session: Uuid, _progress: u8, _changed: &[RecordField]) {}

    /// A record field was set or changed.
    fn on_field_discovered(&self, _session: Uuid, _field: RecordField) {}

    /// `code` was set or changed; fired before `on_ingest_end`.
    fn on_code_available(&self, _session: Uuid, _code: &str) {}

    /// Exactly once per session, with its terminal outcome.
    fn on_finalize(&self, _session: Uuid, _outcome: &SessionOutcome) {}

    fn on_error(&self, _session: Uuid, _error: &StreamError) {}

    fn on_contract_violation(&self, _session: Uuid, _violation: &ContractViolation) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
