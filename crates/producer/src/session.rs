//! Session lifecycle
//!
//! [`SessionManager::connect`] turns a gateway connect outcome into either a
//! live [`Session`] or a typed error. A `Session` disconnects exactly once:
//! explicitly through [`Session::disconnect`], or on drop when a later stage
//! fails.

use courier_core::{
    CallStatus, CompletionCode, ConnectionHandle, Credentials, ReasonCode, SessionState,
};
use courier_ports::BrokerGateway;

use crate::error::ProducerError;

/// Opens sessions against one queue manager
pub struct SessionManager<'g, G: BrokerGateway + ?Sized> {
    gateway: &'g G,
    queue_manager: String,
}

impl<'g, G: BrokerGateway + ?Sized> SessionManager<'g, G> {
    pub fn new(gateway: &'g G, queue_manager: &str) -> Self {
        Self {
            gateway,
            queue_manager: queue_manager.to_string(),
        }
    }

    pub fn queue_manager(&self) -> &str {
        &self.queue_manager
    }

    /// Authenticate and connect
    ///
    /// A warning completion still yields a session; the warning reason is
    /// logged and kept on the session.
    pub fn connect(&self, credentials: &Credentials) -> Result<Session<'g, G>, ProducerError> {
        let acquired = self.gateway.connect(&self.queue_manager, credentials);
        let status = acquired.status;

        let handle = match (status.completion, acquired.handle) {
            (CompletionCode::Failed, _) | (_, None) => {
                tracing::error!(
                    queue_manager = %self.queue_manager,
                    reason = %status.reason,
                    "connect failed"
                );
                return Err(connect_error(&self.queue_manager, status));
            }
            (_, Some(handle)) => handle,
        };

        let warning = if status.is_warning() {
            tracing::warn!(
                queue_manager = %self.queue_manager,
                reason = %status.reason,
                "connect completed with a warning, continuing"
            );
            Some(status.reason)
        } else {
            None
        };

        tracing::info!(
            queue_manager = %self.queue_manager,
            user_id = credentials.user_id(),
            %handle,
            "connected"
        );

        Ok(Session {
            gateway: self.gateway,
            handle,
            queue_manager: self.queue_manager.clone(),
            state: SessionState::Connected,
            warning,
        })
    }
}

fn connect_error(queue_manager: &str, status: CallStatus) -> ProducerError {
    if status.reason == ReasonCode::NOT_AUTHORIZED {
        ProducerError::Auth {
            queue_manager: queue_manager.to_string(),
            reason: status.reason,
        }
    } else {
        ProducerError::Connect {
            queue_manager: queue_manager.to_string(),
            reason: status.reason,
        }
    }
}

/// A connected session with the queue manager
pub struct Session<'g, G: BrokerGateway + ?Sized> {
    gateway: &'g G,
    handle: ConnectionHandle,
    queue_manager: String,
    state: SessionState,
    warning: Option<ReasonCode>,
}

impl<'g, G: BrokerGateway + ?Sized> Session<'g, G> {
    pub fn handle(&self) -> ConnectionHandle {
        self.handle
    }

    pub fn queue_manager(&self) -> &str {
        &self.queue_manager
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Reason code of a warning reported at connect time
    pub fn connect_warning(&self) -> Option<ReasonCode> {
        self.warning
    }

    pub(crate) fn gateway(&self) -> &'g G {
        self.gateway
    }

    /// Disconnect now and report the broker's answer
    pub fn disconnect(mut self) -> CallStatus {
        self.release().unwrap_or_else(CallStatus::ok)
    }

    /// Disconnect if still connected; `None` when already released
    fn release(&mut self) -> Option<CallStatus> {
        if self.state != SessionState::Connected {
            return None;
        }

        let status = self.gateway.disconnect(self.handle);
        if status.is_failed() {
            self.state = SessionState::Failed;
        } else {
            self.state = SessionState::Disconnected;
        }

        if status.reason.is_none() {
            tracing::info!(queue_manager = %self.queue_manager, "disconnected");
        } else {
            tracing::warn!(
                queue_manager = %self.queue_manager,
                reason = %status.reason,
                "disconnect ended with a reason code"
            );
        }
        Some(status)
    }
}

impl<G: BrokerGateway + ?Sized> Drop for Session<'_, G> {
    fn drop(&mut self) {
        self.release();
    }
}
