//! Error handling for hookstream.
//!
//! Only transport failures and contract violations ever surface as errors.
//! Data-shape problems in the model output (unterminated tags, bad numbers,
//! broken JSON) are absorbed by the parser and never reach this module.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection lost, stream cut short | Yes |
//! | Server | Backend error frames, HTTP 5xx | Yes |
//! | Client | HTTP 4xx, undecodable frames | No |
//! | Contract | Session driven out of order | No |
//! | System | Filesystem, serialization | Sometimes |
//! | Configuration | Invalid settings | No |

mod category;
mod client;
mod config;
mod contract;
mod hookstream_error;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use client::ClientError;
pub use config::ConfigError;
pub use contract::ContractViolation;
pub use hookstream_error::HookstreamError;
pub use result::HookstreamResult;
pub use stream::StreamError;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::session::SessionState;

    #[test]
    fn test_error_unification() {
        let stream_err: HookstreamError = StreamError::backend("quota", None).into();
        let contract_err: HookstreamError = ContractViolation::AlreadyFinalized.into();
        let config_err: HookstreamError =
            ConfigError::invalid("HOOKSTREAM_TEMPERATURE", "hot", "not a number").into();
        let io_err: HookstreamError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();

        assert_eq!(stream_err.category(), ErrorCategory::Server);
        assert_eq!(contract_err.category(), ErrorCategory::Contract);
        assert_eq!(config_err.category(), ErrorCategory::Configuration);
        assert_eq!(io_err.category(), ErrorCategory::System);

        for err in [&stream_err, &contract_err, &config_err, &io_err] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_contract_violations_are_distinct_from_stream_errors() {
        let err: HookstreamError = ContractViolation::SessionTerminated {
            state: SessionState::Done,
        }
        .into();
        assert!(matches!(err, HookstreamError::Contract(_)));
        assert!(!err.is_retryable());
        assert!(err.recovery_hint().contains("bug"));
    }

    #[test]
    fn test_retry_logic() {
        let retryable: Vec<HookstreamError> = vec![
            StreamError::ConnectionLost {
                message: "reset".to_string(),
            }
            .into(),
            StreamError::EndedWithoutTerminal.into(),
            ClientError::ServerError {
                status: 503,
                message: "busy".to_string(),
            }
            .into(),
        ];
        for err in retryable {
            assert!(err.is_retryable(), "Expected {:?} to be retryable", err);
        }

        let permanent: Vec<HookstreamError> = vec![
            ContractViolation::NotStarted.into(),
            ClientError::ServerError {
                status: 400,
                message: "bad".to_string(),
            }
            .into(),
            StreamError::Cancelled {
                reason: "user".to_string(),
            }
            .into(),
        ];
        for err in permanent {
            assert!(!err.is_retryable(), "Expected {:?} to not be retryable", err);
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: HookstreamError = json_err.into();
        assert!(matches!(err, HookstreamError::Json(_)));
        assert_eq!(err.category(), ErrorCategory::System);
    }
}
