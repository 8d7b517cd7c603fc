use courier_core::{
    Acquired, CallStatus, ConnectionHandle, Credentials, Message, ObjectHandle, OpenMode,
};

/// Port for the messaging middleware
///
/// Mirrors the broker's call surface: every operation reports a
/// completion/reason pair instead of a Rust error, so callers decide what
/// counts as fatal. Implementations must be thread-safe (Send + Sync).
pub trait BrokerGateway: Send + Sync {
    /// Authenticate and connect to a queue manager
    fn connect(
        &self,
        queue_manager: &str,
        credentials: &Credentials,
    ) -> Acquired<ConnectionHandle>;

    /// Open a named destination on an existing connection
    fn open(
        &self,
        connection: ConnectionHandle,
        destination: &str,
        mode: OpenMode,
    ) -> Acquired<ObjectHandle>;

    /// Put one message to an open destination
    fn put(
        &self,
        connection: ConnectionHandle,
        object: ObjectHandle,
        message: &Message,
    ) -> CallStatus;

    /// Close an open destination
    fn close(&self, connection: ConnectionHandle, object: ObjectHandle) -> CallStatus;

    /// Disconnect from the queue manager
    fn disconnect(&self, connection: ConnectionHandle) -> CallStatus;

    /// Gateway name for logging
    fn name(&self) -> &str {
        "BrokerGateway"
    }
}

impl<G: BrokerGateway + ?Sized> BrokerGateway for &G {
    fn connect(
        &self,
        queue_manager: &str,
        credentials: &Credentials,
    ) -> Acquired<ConnectionHandle> {
        (**self).connect(queue_manager, credentials)
    }

    fn open(
        &self,
        connection: ConnectionHandle,
        destination: &str,
        mode: OpenMode,
    ) -> Acquired<ObjectHandle> {
        (**self).open(connection, destination, mode)
    }

    fn put(
        &self,
        connection: ConnectionHandle,
        object: ObjectHandle,
        message: &Message,
    ) -> CallStatus {
        (**self).put(connection, object, message)
    }

    fn close(&self, connection: ConnectionHandle, object: ObjectHandle) -> CallStatus {
        (**self).close(connection, object)
    }

    fn disconnect(&self, connection: ConnectionHandle) -> CallStatus {
        (**self).disconnect(connection)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
