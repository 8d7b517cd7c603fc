//! Broker Error Types

use thiserror::Error;

/// Error raised while building a broker from configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerConfigError {
    /// No queue managers configured
    #[error("no queue managers configured")]
    NoQueueManagers,

    /// Queue manager name is empty
    #[error("queue manager name must not be empty")]
    EmptyQueueManagerName,

    /// Same queue manager configured twice
    #[error("duplicate queue manager: {0}")]
    DuplicateQueueManager(String),

    /// Queue name is empty
    #[error("queue name must not be empty (queue manager {0})")]
    EmptyQueueName(String),

    /// Same queue configured twice on one queue manager
    #[error("duplicate queue {queue} on queue manager {queue_manager}")]
    DuplicateQueue {
        queue_manager: String,
        queue: String,
    },

    /// Queue capacity of zero
    #[error("queue {0} must have a capacity of at least 1")]
    ZeroCapacity(String),
}
