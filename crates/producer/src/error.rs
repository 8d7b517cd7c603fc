//! Error types for the producer crate

use courier_core::{CallStatus, CompletionCode, ReasonCode};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for failures that originate outside the broker
pub const LOCAL_FAILURE_EXIT_CODE: i32 = 1;

/// Pipeline stage at which a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Config,
    Credentials,
    Connect,
    Open,
    Source,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Credentials => "credentials",
            Stage::Connect => "connect",
            Stage::Open => "open",
            Stage::Source => "source",
        };
        write!(f, "{}", name)
    }
}

/// Fatal run errors
///
/// Every variant aborts the run after acquired resources are released.
/// Per-record failures never surface here.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot read credentials from {path}: {source}")]
    CredentialsUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("credentials in {path} are malformed: expected `<user-id> <password>`")]
    CredentialsMalformed { path: PathBuf },

    #[error("not authorized to connect to {queue_manager}: reason {reason}")]
    Auth {
        queue_manager: String,
        reason: ReasonCode,
    },

    #[error("connect to {queue_manager} failed: reason {reason}")]
    Connect {
        queue_manager: String,
        reason: ReasonCode,
    },

    #[error("unable to open {destination} for output: {status}")]
    Open {
        destination: String,
        status: CallStatus,
    },

    #[error("data source {path} unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading {origin} failed after {records_read} records: {source}")]
    SourceRead {
        origin: String,
        records_read: u64,
        #[source]
        source: io::Error,
    },
}

impl ProducerError {
    pub fn stage(&self) -> Stage {
        match self {
            ProducerError::Config(_) => Stage::Config,
            ProducerError::CredentialsUnavailable { .. }
            | ProducerError::CredentialsMalformed { .. } => Stage::Credentials,
            ProducerError::Auth { .. } | ProducerError::Connect { .. } => Stage::Connect,
            ProducerError::Open { .. } => Stage::Open,
            ProducerError::SourceUnavailable { .. } | ProducerError::SourceRead { .. } => {
                Stage::Source
            }
        }
    }

    /// Broker reason code, when the broker caused the failure
    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            ProducerError::Auth { reason, .. } | ProducerError::Connect { reason, .. } => {
                Some(*reason)
            }
            ProducerError::Open { status, .. } => Some(status.reason),
            _ => None,
        }
    }

    /// Process exit status for this failure
    ///
    /// Connect failures exit with the reason code, open failures with the
    /// open completion code. Local failures exit with
    /// [`LOCAL_FAILURE_EXIT_CODE`]. A code the OS would truncate to a zero
    /// status (low byte 0) falls back to the completion code, then to
    /// [`LOCAL_FAILURE_EXIT_CODE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            ProducerError::Auth { reason, .. } | ProducerError::Connect { reason, .. } => {
                nonzero_or(reason.value(), CompletionCode::Failed.as_i32())
            }
            ProducerError::Open { status, .. } => {
                nonzero_or(status.completion.as_i32(), CompletionCode::Failed.as_i32())
            }
            _ => LOCAL_FAILURE_EXIT_CODE,
        }
    }
}

/// `code` unless its low byte is 0, then `fallback` under the same rule
fn nonzero_or(code: i32, fallback: i32) -> i32 {
    if code & 0xff != 0 {
        code
    } else if fallback & 0xff != 0 {
        fallback
    } else {
        LOCAL_FAILURE_EXIT_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_exit_code_is_reason() {
        let err = ProducerError::Auth {
            queue_manager: "QM1".to_string(),
            reason: ReasonCode::NOT_AUTHORIZED,
        };
        assert_eq!(err.exit_code(), 2035);
        assert_eq!(err.stage(), Stage::Connect);
        assert_eq!(err.reason(), Some(ReasonCode::NOT_AUTHORIZED));
    }

    #[test]
    fn test_open_exit_code_is_completion() {
        let err = ProducerError::Open {
            destination: "Q1".to_string(),
            status: CallStatus::failed(ReasonCode::UNKNOWN_OBJECT_NAME),
        };
        assert_eq!(err.exit_code(), 2);

        let err = ProducerError::Open {
            destination: "Q1".to_string(),
            status: CallStatus::failed(ReasonCode::NONE),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_never_truncates_to_zero() {
        let err = ProducerError::Connect {
            queue_manager: "QM1".to_string(),
            reason: ReasonCode(2048),
        };
        assert_eq!(err.exit_code(), 2);
        assert_ne!(err.exit_code() & 0xff, 0);

        let err = ProducerError::Connect {
            queue_manager: "QM1".to_string(),
            reason: ReasonCode::NONE,
        };
        assert_eq!(err.exit_code(), 2);

        let err = ProducerError::Open {
            destination: "Q1".to_string(),
            status: CallStatus {
                completion: CompletionCode::Ok,
                reason: ReasonCode::NONE,
            },
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_local_failures_use_generic_code() {
        let err = ProducerError::SourceUnavailable {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.exit_code(), LOCAL_FAILURE_EXIT_CODE);
        assert_eq!(err.stage(), Stage::Source);
        assert!(err.reason().is_none());

        let err = ProducerError::CredentialsMalformed {
            path: PathBuf::from("mqusers"),
        };
        assert_eq!(err.exit_code(), LOCAL_FAILURE_EXIT_CODE);
        assert_eq!(err.stage(), Stage::Credentials);
    }

    #[test]
    fn test_display_mentions_stage_details() {
        let err = ProducerError::Connect {
            queue_manager: "QM1".to_string(),
            reason: ReasonCode::Q_MGR_NAME_ERROR,
        };
        let msg = err.to_string();
        assert!(msg.contains("QM1"));
        assert!(msg.contains("2058"));
    }
}
