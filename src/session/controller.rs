//! Per-request orchestration of one streaming session.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::{Stream, StreamExt};
use uuid::Uuid;

use super::outcome::{SessionOutcome, SessionResult, SessionUpdate};
use super::state::SessionState;
use crate::config::SessionConfig;
use crate::error::{ContractViolation, StreamError};
use crate::models::{GenerationRecord, WorkingRecord};
use crate::observer::{NoopObserver, SessionObserver};
use crate::parser::StreamParser;
use crate::sse::StreamFrame;

/// Drives one streaming session from `Idle` to a terminal state.
///
/// Each session owns its parser; nothing is shared between sessions. The
/// controller is single-task: frames must be handed over in arrival order.
pub struct StreamSession {
    id: Uuid,
    config: SessionConfig,
    state: SessionState,
    parser: Option<StreamParser>,
    /// Finalized record and reply, kept for inspection after `Done`
    finished: Option<(GenerationRecord, String)>,
    observer: Arc<dyn SessionObserver>,
}

impl std::fmt::Debug for StreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl StreamSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            state: SessionState::Idle,
            parser: None,
            finished: None,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Use a caller-chosen id, e.g. one already sent to the backend.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Enter `Streaming` with a fresh parser.
    pub fn start(&mut self) -> Result<(), ContractViolation> {
        if self.state != SessionState::Idle {
            return Err(self.violation(ContractViolation::AlreadyStarted { state: self.state }));
        }
        self.parser = Some(StreamParser::new(&self.config));
        self.transition(SessionState::Streaming);
        Ok(())
    }

    /// Classify and handle one transport frame.
    pub fn handle_frame(&mut self, frame: StreamFrame) -> Result<SessionUpdate, ContractViolation> {
        match frame {
            StreamFrame::Data(content) => self.ingest(&content),
            StreamFrame::Error { message, kind } => self
                .fail(StreamError::Backend {
                    message,
                    error_type: kind,
                })
                .map(SessionUpdate::Finished),
            StreamFrame::Done => self.finalize().map(SessionUpdate::Finished),
        }
    }

    /// Feed one data fragment to the parser.
    pub fn ingest(&mut self, fragment: &str) -> Result<SessionUpdate, ContractViolation> {
        self.ensure_streaming()?;
        let id = self.id;
        let observer = Arc::clone(&self.observer);
        let parser = self.parser.as_mut().ok_or(ContractViolation::NotStarted)?;

        observer.on_ingest_start(id, fragment.len());
        let view = parser.ingest(fragment);
        for field in view.changed() {
            observer.on_field_discovered(id, *field);
        }
        let code = view.code().map(str::to_string);
        if let Some(code) = &code {
            observer.on_code_available(id, code);
        }
        observer.on_ingest_end(id, view.progress(), view.changed());

        Ok(SessionUpdate::Progress {
            progress: view.progress(),
            changed: view.changed().to_vec(),
            code,
        })
    }

    /// End the session on a transport-level failure.
    ///
    /// Errors that only mean "the stream stopped early" end in `Aborted`
    /// with an `Incomplete` outcome; everything else ends in `Errored`.
    /// The partial record is preserved either way.
    pub fn fail(&mut self, error: StreamError) -> Result<SessionOutcome, ContractViolation> {
        self.ensure_streaming()?;
        self.observer.on_error(self.id, &error);

        let partial = self.partial();
        let reply = self.reply();
        let outcome = if error.is_incomplete() {
            self.transition(SessionState::Aborted);
            SessionOutcome::Incomplete {
                reason: error,
                partial,
                reply,
            }
        } else {
            self.transition(SessionState::Errored);
            SessionOutcome::Failed {
                error,
                partial,
                reply,
            }
        };
        self.observer.on_finalize(self.id, &outcome);
        Ok(outcome)
    }

    /// Cancel the session. Never produces a finalized record.
    pub fn abort(
        &mut self,
        reason: impl Into<String>,
    ) -> Result<SessionOutcome, ContractViolation> {
        self.fail(StreamError::Cancelled {
            reason: reason.into(),
        })
    }

    /// Finalize after the terminal marker: exactly once per session.
    pub fn finalize(&mut self) -> Result<SessionOutcome, ContractViolation> {
        self.ensure_streaming()?;
        self.transition(SessionState::Finalizing);

        let Some(parser) = self.parser.take() else {
            return Err(self.violation(ContractViolation::NotStarted));
        };
        let reply = parser.reply_text();
        let record = parser.finalize();
        self.finished = Some((record.clone(), reply.clone()));

        let outcome = SessionOutcome::Completed(SessionResult {
            session_id: self.id,
            record,
            reply,
            completed_at: Utc::now(),
        });
        self.transition(SessionState::Done);
        self.observer.on_finalize(self.id, &outcome);
        Ok(outcome)
    }

    /// Consumer-facing projection of what has been extracted so far.
    pub fn partial(&self) -> GenerationRecord {
        match (&self.parser, &self.finished) {
            (Some(parser), _) => parser.snapshot(),
            (None, Some((record, _))) => record.clone(),
            (None, None) => GenerationRecord::default(),
        }
    }

    /// Working record with diagnostics, while a parser is live.
    pub fn working(&self) -> Option<&WorkingRecord> {
        self.parser.as_ref().map(StreamParser::record)
    }

    /// Reply text accumulated so far (or the final reply after `Done`).
    pub fn reply(&self) -> String {
        match (&self.parser, &self.finished) {
            (Some(parser), _) => parser.reply_text(),
            (None, Some((_, reply))) => reply.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn progress(&self) -> u8 {
        match (&self.parser, self.state) {
            (_, SessionState::Done) => 100,
            (Some(parser), _) => parser.progress(),
            (None, _) => 0,
        }
    }

    /// Consume a frame stream until the session ends.
    ///
    /// Starts the session if needed. A stream that ends without the terminal
    /// marker yields [`SessionOutcome::Incomplete`].
    pub async fn run<S, E>(&mut self, frames: S) -> Result<SessionOutcome, ContractViolation>
    where
        S: Stream<Item = Result<StreamFrame, E>>,
        E: Into<StreamError>,
    {
        self.run_with_cancel(frames, std::future::pending::<()>())
            .await
    }

    /// Like [`run`](Self::run), but stops with an `Incomplete` outcome as
    /// soon as `cancel` resolves.
    pub async fn run_with_cancel<S, E, C>(
        &mut self,
        frames: S,
        cancel: C,
    ) -> Result<SessionOutcome, ContractViolation>
    where
        S: Stream<Item = Result<StreamFrame, E>>,
        E: Into<StreamError>,
        C: Future<Output = ()>,
    {
        if self.state == SessionState::Idle {
            self.start()?;
        }

        tokio::pin!(frames);
        tokio::pin!(cancel);

        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    return self.abort("cancelled by caller");
                }
                item = frames.next() => match item {
                    Some(Ok(frame)) => {
                        if let SessionUpdate::Finished(outcome) = self.handle_frame(frame)? {
                            return Ok(outcome);
                        }
                    }
                    Some(Err(e)) => return self.fail(e.into()),
                    None => return self.fail(StreamError::EndedWithoutTerminal),
                }
            }
        }
    }

    fn ensure_streaming(&self) -> Result<(), ContractViolation> {
        match self.state {
            SessionState::Streaming => Ok(()),
            SessionState::Idle => Err(self.violation(ContractViolation::NotStarted)),
            SessionState::Done => Err(self.violation(ContractViolation::AlreadyFinalized)),
            state => Err(self.violation(ContractViolation::SessionTerminated { state })),
        }
    }

    fn violation(&self, violation: ContractViolation) -> ContractViolation {
        self.observer.on_contract_violation(self.id, &violation);
        violation
    }

    fn transition(&mut self, to: SessionState) {
        let from = self.state;
        self.state = to;
        self.observer.on_state_change(self.id, from, to);
    }
}
