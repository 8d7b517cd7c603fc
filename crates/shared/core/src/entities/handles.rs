use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque connection handle issued by the broker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionHandle(pub u64);

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hconn-{}", self.0)
    }
}

/// Opaque object handle for an open destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hobj-{}", self.0)
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Disconnected,
    Connected,
    Failed,
}

/// Destination lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestinationState {
    Closed,
    Open,
}

/// Access mode requested when opening a destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenMode {
    /// Put-only access; fail if the queue manager is quiescing
    #[default]
    Output,
}

/// Completion of a broker call that yields a handle
///
/// `handle` is present whenever the completion is not `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired<H> {
    pub handle: Option<H>,
    pub status: crate::CallStatus,
}

impl<H> Acquired<H> {
    pub fn granted(handle: H, status: crate::CallStatus) -> Self {
        Self {
            handle: Some(handle),
            status,
        }
    }

    pub fn refused(status: crate::CallStatus) -> Self {
        Self {
            handle: None,
            status,
        }
    }
}
