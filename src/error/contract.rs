//! Session contract violations.
//!
//! These mean the caller drove a session incorrectly. They are never caused
//! by the content of a stream.

use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("session has not been started")]
    NotStarted,

    #[error("session already started (state: {state})")]
    AlreadyStarted { state: SessionState },

    #[error("session already finalized")]
    AlreadyFinalized,

    #[error("session is terminated (state: {state}); no further input accepted")]
    SessionTerminated { state: SessionState },
}

impl ContractViolation {
    pub fn error_code(&self) -> &'static str {
        match self {
            ContractViolation::NotStarted => "E_CONTRACT_NOT_STARTED",
            ContractViolation::AlreadyStarted { .. } => "E_CONTRACT_STARTED",
            ContractViolation::AlreadyFinalized => "E_CONTRACT_FINALIZED",
            ContractViolation::SessionTerminated { .. } => "E_CONTRACT_TERMINATED",
        }
    }
}
