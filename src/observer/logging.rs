use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use super::SessionObserver;
use crate::error::{ContractViolation, StreamError};
use crate::models::RecordField;
use crate::session::{SessionOutcome, SessionState};

/// Emits structured `tracing` events for every lifecycle point.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_state_change(&self, session: Uuid, from: SessionState, to: SessionState) {
        debug!(%session, %from, %to, "session state changed");
    }

    fn on_ingest_start(&self, session: Uuid, fragment_len: usize) {
        trace!(%session, fragment_len, "ingest start");
    }

    fn on_ingest_end(&self, session: Uuid, progress: u8, changed: &[RecordField]) {
        trace!(%session, progress, changed = changed.len(), "ingest end");
    }

    fn on_field_discovered(&self, session: Uuid, field: RecordField) {
        debug!(%session, %field, "field discovered");
    }

    fn on_code_available(&self, session: Uuid, code: &str) {
        info!(%session, code_len = code.len(), "hook code available");
    }

    fn on_finalize(&self, session: Uuid, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::Completed(result) => info!(
                %session,
                name = result.record.name.as_deref().unwrap_or("-"),
                reply_len = result.reply.len(),
                "session completed"
            ),
            SessionOutcome::Failed { error, .. } => {
                warn!(%session, code = error.error_code(), %error, "session failed")
            }
            SessionOutcome::Incomplete { reason, .. } => {
                warn!(%session, code = reason.error_code(), %reason, "session incomplete")
            }
        }
    }

    fn on_error(&self, session: Uuid, error: &StreamError) {
        warn!(%session, kind = error.kind(), %error, "stream error");
    }

    fn on_contract_violation(&self, session: Uuid, violation: &ContractViolation) {
        warn!(%session, code = violation.error_code(), %violation, "contract violation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use crate::models::GenerationRecord;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_emits_lifecycle_events() {
        let session = Uuid::new_v4();
        let output = capture(|| {
            let observer = TracingObserver;
            observer.on_state_change(session, SessionState::Idle, SessionState::Streaming);
            observer.on_field_discovered(session, RecordField::Code);
            observer.on_code_available(session, "contract A{}");
        });

        assert!(output.contains("session state changed"));
        assert!(output.contains(&session.to_string()));
        assert!(output.contains("field discovered"));
        assert!(output.contains("code_len=12"));
    }

    #[test]
    fn test_failures_are_warnings_with_codes() {
        let session = Uuid::new_v4();
        let output = capture(|| {
            let observer = TracingObserver;
            observer.on_finalize(
                session,
                &SessionOutcome::Incomplete {
                    reason: StreamError::EndedWithoutTerminal,
                    partial: GenerationRecord::default(),
                    reply: String::new(),
                },
            );
            observer.on_contract_violation(session, &ContractViolation::AlreadyFinalized);
        });

        assert!(output.contains("WARN"));
        assert!(output.contains("session incomplete"));
        assert!(output.contains("E_STREAM_INCOMPLETE"));
        assert!(output.contains("E_CONTRACT_FINALIZED"));
    }
}
