//! Test doubles for session collaborators.

use std::sync::Mutex;

use hookstream::error::{ContractViolation, StreamError};
use hookstream::models::RecordField;
use hookstream::observer::SessionObserver;
use hookstream::session::{SessionOutcome, SessionState};
use uuid::Uuid;

/// One observed lifecycle callback.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Observed {
    State(SessionState, SessionState),
    IngestStart(usize),
    IngestEnd(u8),
    Field(RecordField),
    Code(String),
    Finalize(bool),
    Error(String),
    Violation(String),
}

/// Observer that records every callback in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Observed>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Observed> {
        self.events.lock().unwrap().clone()
    }

    pub fn codes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Observed::Code(code) => Some(code),
                _ => None,
            })
            .collect()
    }

    pub fn finalize_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Observed::Finalize(_)))
            .count()
    }

    fn push(&self, event: Observed) {
        self.events.lock().unwrap().push(event);
    }
}

impl SessionObserver for RecordingObserver {
    fn on_state_change(&self, _session: Uuid, from: SessionState, to: SessionState) {
        self.push(Observed::State(from, to));
    }

    fn on_ingest_start(&self, _session: Uuid, fragment_len: usize) {
        self.push(Observed::IngestStart(fragment_len));
    }

    fn on_ingest_end(&self, _session: Uuid, progress: u8, _changed: &[RecordField]) {
        self.push(Observed::IngestEnd(progress));
    }

    fn on_field_discovered(&self, _session: Uuid, field: RecordField) {
        self.push(Observed::Field(field));
    }

    fn on_code_available(&self, _session: Uuid, code: &str) {
        self.push(Observed::Code(code.to_string()));
    }

    fn on_finalize(&self, _session: Uuid, outcome: &SessionOutcome) {
        self.push(Observed::Finalize(outcome.is_completed()));
    }

    fn on_error(&self, _session: Uuid, error: &StreamError) {
        self.push(Observed::Error(error.kind().to_string()));
    }

    fn on_contract_violation(&self, _session: Uuid, violation: &ContractViolation) {
        self.push(Observed::Violation(violation.error_code().to_string()));
    }
}
