//! In-process Queue Manager
//!
//! Implements [`BrokerGateway`] over channel-backed queues. Connections and
//! open objects live in a handle table guarded by a mutex; handles are
//! never reused within one broker.

use courier_core::{
    Acquired, CallStatus, ConnectionHandle, Credentials, Message, ObjectHandle, OpenMode,
    ReasonCode,
};
use courier_ports::BrokerGateway;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{BrokerConfig, QueueManagerConfig};
use crate::error::BrokerConfigError;
use crate::queue::{Queue, QueueReceiver, Refusal};

struct QueueManager {
    /// user id -> password; empty means authentication is off
    users: HashMap<String, String>,
    queues: HashMap<String, Arc<Queue>>,
}

impl QueueManager {
    fn from_config(config: &QueueManagerConfig) -> Self {
        Self {
            users: config
                .users
                .iter()
                .map(|u| (u.user_id.clone(), u.password.clone()))
                .collect(),
            queues: config
                .queues
                .iter()
                .map(|q| (q.name.clone(), Arc::new(Queue::new(q.clone()))))
                .collect(),
        }
    }

    fn authenticate(&self, credentials: &Credentials) -> bool {
        if self.users.is_empty() {
            return true;
        }
        self.users
            .get(credentials.user_id())
            .is_some_and(|password| password == credentials.password())
    }
}

struct Connection {
    queue_manager: String,
    user_id: String,
    objects: HashSet<u64>,
}

struct OpenObject {
    connection: u64,
    queue: Arc<Queue>,
}

#[derive(Default)]
struct HandleTable {
    connections: HashMap<u64, Connection>,
    objects: HashMap<u64, OpenObject>,
}

/// Queue manager running inside the producer's process
pub struct InProcessBroker {
    managers: HashMap<String, QueueManager>,
    table: Mutex<HandleTable>,
    next_handle: AtomicU64,
}

impl InProcessBroker {
    /// Build a broker from validated configuration
    pub fn from_config(config: &BrokerConfig) -> Result<Self, BrokerConfigError> {
        config.validate()?;
        let managers = config
            .queue_managers
            .iter()
            .map(|qm| (qm.name.clone(), QueueManager::from_config(qm)))
            .collect();

        Ok(Self {
            managers,
            table: Mutex::new(HandleTable::default()),
            next_handle: AtomicU64::new(1),
        })
    }

    /// Consumer end of a queue, if it exists
    pub fn receiver(&self, queue_manager: &str, queue: &str) -> Option<QueueReceiver> {
        self.managers
            .get(queue_manager)?
            .queues
            .get(queue)
            .map(|q| q.receiver())
    }

    /// Consumers for every queue on every queue manager
    pub fn receivers(&self) -> Vec<QueueReceiver> {
        self.managers
            .values()
            .flat_map(|qm| qm.queues.values().map(|q| q.receiver()))
            .collect()
    }

    /// Current depth of a queue, if it exists
    pub fn depth(&self, queue_manager: &str, queue: &str) -> Option<usize> {
        self.managers
            .get(queue_manager)?
            .queues
            .get(queue)
            .map(|q| q.depth())
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.table.lock().connections.len()
    }

    /// Number of open objects across all connections
    pub fn open_object_count(&self) -> usize {
        self.table.lock().objects.len()
    }

    fn allocate_handle(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::SeqCst)
    }
}

impl BrokerGateway for InProcessBroker {
    fn connect(
        &self,
        queue_manager: &str,
        credentials: &Credentials,
    ) -> Acquired<ConnectionHandle> {
        let Some(manager) = self.managers.get(queue_manager) else {
            tracing::debug!(queue_manager, "connect refused: unknown queue manager");
            return Acquired::refused(CallStatus::failed(ReasonCode::Q_MGR_NAME_ERROR));
        };

        if !manager.authenticate(credentials) {
            tracing::debug!(
                queue_manager,
                user_id = credentials.user_id(),
                "connect refused: bad credentials"
            );
            return Acquired::refused(CallStatus::failed(ReasonCode::NOT_AUTHORIZED));
        }

        let mut table = self.table.lock();

        // Same user already connected: hand back the live connection
        if let Some((&existing, _)) = table.connections.iter().find(|(_, c)| {
            c.queue_manager == queue_manager && c.user_id == credentials.user_id()
        }) {
            return Acquired::granted(
                ConnectionHandle(existing),
                CallStatus::warning(ReasonCode::ALREADY_CONNECTED),
            );
        }

        let handle = self.allocate_handle();
        table.connections.insert(
            handle,
            Connection {
                queue_manager: queue_manager.to_string(),
                user_id: credentials.user_id().to_string(),
                objects: HashSet::new(),
            },
        );
        tracing::debug!(queue_manager, handle, "connection established");
        Acquired::granted(ConnectionHandle(handle), CallStatus::ok())
    }

    fn open(
        &self,
        connection: ConnectionHandle,
        destination: &str,
        mode: OpenMode,
    ) -> Acquired<ObjectHandle> {
        let mut table = self.table.lock();
        let Some(conn) = table.connections.get(&connection.0) else {
            return Acquired::refused(CallStatus::failed(ReasonCode::HCONN_ERROR));
        };

        let queue = self
            .managers
            .get(&conn.queue_manager)
            .and_then(|qm| qm.queues.get(destination))
            .cloned();
        let Some(queue) = queue else {
            return Acquired::refused(CallStatus::failed(ReasonCode::UNKNOWN_OBJECT_NAME));
        };

        let handle = self.allocate_handle();
        if let Some(conn) = table.connections.get_mut(&connection.0) {
            conn.objects.insert(handle);
        }
        table.objects.insert(
            handle,
            OpenObject {
                connection: connection.0,
                queue,
            },
        );
        tracing::debug!(destination, ?mode, handle, "object opened");
        Acquired::granted(ObjectHandle(handle), CallStatus::ok())
    }

    fn put(
        &self,
        connection: ConnectionHandle,
        object: ObjectHandle,
        message: &Message,
    ) -> CallStatus {
        let (queue, user_id) = {
            let table = self.table.lock();
            let Some(conn) = table.connections.get(&connection.0) else {
                return CallStatus::failed(ReasonCode::HCONN_ERROR);
            };
            match table.objects.get(&object.0) {
                Some(obj) if obj.connection == connection.0 => {
                    (Arc::clone(&obj.queue), conn.user_id.clone())
                }
                _ => return CallStatus::failed(ReasonCode::HOBJ_ERROR),
            }
        };

        match queue.offer(message, &user_id) {
            Ok(sequence) => {
                tracing::trace!(queue = queue.name(), sequence, "message stored");
                CallStatus::ok()
            }
            Err(Refusal::Full) => CallStatus::failed(ReasonCode::Q_FULL),
            Err(Refusal::Inhibited) => CallStatus::failed(ReasonCode::PUT_INHIBITED),
            Err(Refusal::TooBig) => CallStatus::failed(ReasonCode::MSG_TOO_BIG_FOR_Q),
            Err(Refusal::Broken) => CallStatus::failed(ReasonCode::CONNECTION_BROKEN),
        }
    }

    fn close(&self, connection: ConnectionHandle, object: ObjectHandle) -> CallStatus {
        let mut table = self.table.lock();
        if !table.connections.contains_key(&connection.0) {
            return CallStatus::failed(ReasonCode::HCONN_ERROR);
        }
        match table.objects.get(&object.0) {
            Some(obj) if obj.connection == connection.0 => {}
            _ => return CallStatus::failed(ReasonCode::HOBJ_ERROR),
        }

        table.objects.remove(&object.0);
        if let Some(conn) = table.connections.get_mut(&connection.0) {
            conn.objects.remove(&object.0);
        }
        CallStatus::ok()
    }

    fn disconnect(&self, connection: ConnectionHandle) -> CallStatus {
        let mut table = self.table.lock();
        let Some(conn) = table.connections.remove(&connection.0) else {
            return CallStatus::failed(ReasonCode::HCONN_ERROR);
        };

        // Objects left open are closed implicitly
        for object in &conn.objects {
            table.objects.remove(object);
        }
        if !conn.objects.is_empty() {
            tracing::debug!(
                handle = connection.0,
                closed = conn.objects.len(),
                "disconnect closed objects left open"
            );
        }
        CallStatus::ok()
    }

    fn name(&self) -> &str {
        "InProcessBroker"
    }
}
