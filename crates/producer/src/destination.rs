//! Destination lifecycle
//!
//! A [`DestinationHandle`] borrows the [`Session`] it was opened on, so the
//! compiler keeps the session connected for as long as the destination is
//! open, and the destination is always closed first.

use courier_core::{
    CallStatus, DeliveryOutcome, DestinationState, Message, ObjectHandle, OpenMode,
};
use courier_ports::BrokerGateway;

use crate::delivery::Submitter;
use crate::error::ProducerError;
use crate::session::Session;

/// An open output destination bound to a live session
pub struct DestinationHandle<'s, 'g, G: BrokerGateway + ?Sized> {
    session: &'s Session<'g, G>,
    handle: ObjectHandle,
    name: String,
    state: DestinationState,
}

impl<'s, 'g, G: BrokerGateway + ?Sized> DestinationHandle<'s, 'g, G> {
    /// Open `name` on `session`
    ///
    /// Any reason code on a successful open is logged. A failed open is
    /// returned as [`ProducerError::Open`]; the session is left to the caller.
    pub fn open(
        session: &'s Session<'g, G>,
        name: &str,
        mode: OpenMode,
    ) -> Result<Self, ProducerError> {
        let acquired = session.gateway().open(session.handle(), name, mode);
        let status = acquired.status;

        if !status.reason.is_none() {
            tracing::warn!(
                destination = name,
                reason = %status.reason,
                "open ended with a reason code"
            );
        }

        let handle = match acquired.handle {
            Some(handle) if !status.is_failed() => handle,
            _ => {
                tracing::error!(
                    destination = name,
                    queue_manager = session.queue_manager(),
                    "unable to open destination for output"
                );
                return Err(ProducerError::Open {
                    destination: name.to_string(),
                    status,
                });
            }
        };

        tracing::info!(destination = name, %handle, "destination open");
        Ok(Self {
            session,
            handle,
            name: name.to_string(),
            state: DestinationState::Open,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn state(&self) -> DestinationState {
        self.state
    }

    /// Put one message and return the raw broker status
    pub fn put(&self, message: &Message) -> CallStatus {
        self.session
            .gateway()
            .put(self.session.handle(), self.handle, message)
    }

    /// Close now and report the broker's answer
    pub fn close(mut self) -> CallStatus {
        self.release().unwrap_or_else(CallStatus::ok)
    }

    fn release(&mut self) -> Option<CallStatus> {
        if self.state != DestinationState::Open {
            return None;
        }

        let status = self
            .session
            .gateway()
            .close(self.session.handle(), self.handle);
        self.state = DestinationState::Closed;

        if status.reason.is_none() {
            tracing::info!(destination = %self.name, "destination closed");
        } else {
            tracing::warn!(
                destination = %self.name,
                reason = %status.reason,
                "close ended with a reason code"
            );
        }
        Some(status)
    }
}

impl<G: BrokerGateway + ?Sized> Submitter for DestinationHandle<'_, '_, G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&self, message: &Message) -> DeliveryOutcome {
        DeliveryOutcome::classify(self.put(message))
    }
}

impl<G: BrokerGateway + ?Sized> Drop for DestinationHandle<'_, '_, G> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionManager;
    use courier_broker::{BrokerConfig, InProcessBroker};
    use courier_core::{Credentials, ReasonCode};

    fn broker(capacity: usize) -> InProcessBroker {
        let config = BrokerConfig::single_queue("QM1", "app", "secret", "Q1", capacity);
        InProcessBroker::from_config(&config).unwrap()
    }

    fn creds() -> Credentials {
        Credentials::new("app", "secret").unwrap()
    }

    #[test]
    fn test_open_put_close() {
        let broker = broker(10);
        let session = SessionManager::new(&broker, "QM1").connect(&creds()).unwrap();
        let destination = DestinationHandle::open(&session, "Q1", OpenMode::Output).unwrap();
        assert_eq!(destination.state(), DestinationState::Open);

        assert_eq!(
            destination.submit(&Message::new("t=1\n")),
            DeliveryOutcome::Success
        );
        assert_eq!(broker.open_object_count(), 1);

        assert_eq!(destination.close(), CallStatus::ok());
        assert_eq!(broker.open_object_count(), 0);
        assert!(session.is_connected());
    }

    #[test]
    fn test_submit_classifies_queue_full() {
        let broker = broker(1);
        let session = SessionManager::new(&broker, "QM1").connect(&creds()).unwrap();
        let destination = DestinationHandle::open(&session, "Q1", OpenMode::Output).unwrap();

        assert_eq!(destination.submit(&Message::new("a")), DeliveryOutcome::Success);
        assert_eq!(
            destination.submit(&Message::new("b")),
            DeliveryOutcome::ResourceFull(ReasonCode::Q_FULL)
        );
    }

    #[test]
    fn test_open_unknown_destination() {
        let broker = broker(10);
        let session = SessionManager::new(&broker, "QM1").connect(&creds()).unwrap();
        let err = DestinationHandle::open(&session, "MISSING", OpenMode::Output)
            .err()
            .unwrap();

        assert!(matches!(err, ProducerError::Open { .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(broker.open_object_count(), 0);
    }

    #[test]
    fn test_drop_closes_before_session_disconnects() {
        let broker = broker(10);
        {
            let session = SessionManager::new(&broker, "QM1").connect(&creds()).unwrap();
            let _destination = DestinationHandle::open(&session, "Q1", OpenMode::Output).unwrap();
            assert_eq!(broker.open_object_count(), 1);
        }
        assert_eq!(broker.open_object_count(), 0);
        assert_eq!(broker.connection_count(), 0);
    }
}
