//! Broker result codes
//!
//! Every broker call reports a coarse [`CompletionCode`] plus a fine-grained
//! [`ReasonCode`]. The pair travels together as a [`CallStatus`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level result category of a broker call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionCode {
    /// Call completed normally
    Ok,
    /// Call completed but the broker has something to report
    Warning,
    /// Call did not complete
    Failed,
}

impl CompletionCode {
    /// Numeric wire value (0, 1, 2)
    pub fn as_i32(&self) -> i32 {
        match self {
            CompletionCode::Ok => 0,
            CompletionCode::Warning => 1,
            CompletionCode::Failed => 2,
        }
    }

    /// Returns true if the call produced a usable result
    pub fn is_usable(&self) -> bool {
        !matches!(self, CompletionCode::Failed)
    }
}

impl fmt::Display for CompletionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionCode::Ok => write!(f, "ok"),
            CompletionCode::Warning => write!(f, "warning"),
            CompletionCode::Failed => write!(f, "failed"),
        }
    }
}

/// Diagnostic code accompanying a completion code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonCode(pub i32);

impl ReasonCode {
    pub const NONE: ReasonCode = ReasonCode(0);
    pub const ALREADY_CONNECTED: ReasonCode = ReasonCode(2002);
    pub const CONNECTION_BROKEN: ReasonCode = ReasonCode(2009);
    pub const HCONN_ERROR: ReasonCode = ReasonCode(2018);
    pub const HOBJ_ERROR: ReasonCode = ReasonCode(2019);
    pub const MSG_TOO_BIG_FOR_Q: ReasonCode = ReasonCode(2030);
    pub const NOT_AUTHORIZED: ReasonCode = ReasonCode(2035);
    pub const PUT_INHIBITED: ReasonCode = ReasonCode(2051);
    pub const Q_FULL: ReasonCode = ReasonCode(2053);
    pub const Q_MGR_NAME_ERROR: ReasonCode = ReasonCode(2058);
    pub const UNKNOWN_OBJECT_NAME: ReasonCode = ReasonCode(2085);

    /// Raw numeric value
    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        *self == ReasonCode::NONE
    }

    /// The destination cannot accept more messages right now
    pub fn is_resource_full(&self) -> bool {
        *self == ReasonCode::Q_FULL
    }

    /// Symbolic name for well-known codes
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            ReasonCode::NONE => "NONE",
            ReasonCode::ALREADY_CONNECTED => "ALREADY_CONNECTED",
            ReasonCode::CONNECTION_BROKEN => "CONNECTION_BROKEN",
            ReasonCode::HCONN_ERROR => "HCONN_ERROR",
            ReasonCode::HOBJ_ERROR => "HOBJ_ERROR",
            ReasonCode::MSG_TOO_BIG_FOR_Q => "MSG_TOO_BIG_FOR_Q",
            ReasonCode::NOT_AUTHORIZED => "NOT_AUTHORIZED",
            ReasonCode::PUT_INHIBITED => "PUT_INHIBITED",
            ReasonCode::Q_FULL => "Q_FULL",
            ReasonCode::Q_MGR_NAME_ERROR => "Q_MGR_NAME_ERROR",
            ReasonCode::UNKNOWN_OBJECT_NAME => "UNKNOWN_OBJECT_NAME",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Completion and reason pair returned by every broker call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStatus {
    pub completion: CompletionCode,
    pub reason: ReasonCode,
}

impl CallStatus {
    pub fn ok() -> Self {
        Self {
            completion: CompletionCode::Ok,
            reason: ReasonCode::NONE,
        }
    }

    pub fn warning(reason: ReasonCode) -> Self {
        Self {
            completion: CompletionCode::Warning,
            reason,
        }
    }

    pub fn failed(reason: ReasonCode) -> Self {
        Self {
            completion: CompletionCode::Failed,
            reason,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.completion == CompletionCode::Failed
    }

    pub fn is_warning(&self) -> bool {
        self.completion == CompletionCode::Warning
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "completion {}, reason {}", self.completion, self.reason)
    }
}
