//! Broker Configuration
//!
//! Configuration types for building an in-process queue manager from config files.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::BrokerConfigError;

/// A user allowed to connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub user_id: String,
    pub password: String,
}

/// Queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Queue name (e.g. "DEV.Q1")
    pub name: String,

    /// Maximum queue depth (backpressure threshold)
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,

    /// Largest payload accepted, in bytes
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    /// Reject every put while set
    #[serde(default)]
    pub put_inhibited: bool,
}

fn default_queue_capacity() -> usize {
    5_000
}

fn default_max_message_length() -> usize {
    4 * 1024 * 1024
}

impl QueueConfig {
    pub fn new(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            max_message_length: default_max_message_length(),
            put_inhibited: false,
        }
    }
}

/// Queue manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueManagerConfig {
    pub name: String,

    /// Accepted users; an empty list disables authentication
    #[serde(default)]
    pub users: Vec<UserConfig>,

    #[serde(default)]
    pub queues: Vec<QueueConfig>,
}

/// Background consumer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainConfig {
    /// Pause between drain passes
    #[serde(default = "default_drain_interval_ms")]
    pub interval_ms: u64,

    /// Messages removed per pass
    #[serde(default = "default_drain_batch")]
    pub batch: usize,
}

fn default_drain_interval_ms() -> u64 {
    10
}

fn default_drain_batch() -> usize {
    100
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_drain_interval_ms(),
            batch: default_drain_batch(),
        }
    }
}

/// Root broker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(default = "default_queue_managers")]
    pub queue_managers: Vec<QueueManagerConfig>,

    /// Drain every queue in the background when set
    #[serde(default)]
    pub drain: Option<DrainConfig>,
}

fn default_queue_managers() -> Vec<QueueManagerConfig> {
    vec![QueueManagerConfig {
        name: "QM_S1558".to_string(),
        users: Vec::new(),
        queues: vec![QueueConfig::new("DEV.Q1", default_queue_capacity())],
    }]
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            queue_managers: default_queue_managers(),
            drain: None,
        }
    }
}

impl BrokerConfig {
    /// One queue manager, one user, one queue
    pub fn single_queue(
        queue_manager: &str,
        user_id: &str,
        password: &str,
        queue: &str,
        capacity: usize,
    ) -> Self {
        Self {
            queue_managers: vec![QueueManagerConfig {
                name: queue_manager.to_string(),
                users: vec![UserConfig {
                    user_id: user_id.to_string(),
                    password: password.to_string(),
                }],
                queues: vec![QueueConfig::new(queue, capacity)],
            }],
            drain: None,
        }
    }

    /// Enable background draining
    pub fn with_drain(mut self, interval_ms: u64, batch: usize) -> Self {
        self.drain = Some(DrainConfig { interval_ms, batch });
        self
    }

    /// Check names are present and unique and capacities are non-zero
    pub fn validate(&self) -> Result<(), BrokerConfigError> {
        if self.queue_managers.is_empty() {
            return Err(BrokerConfigError::NoQueueManagers);
        }

        let mut managers = HashSet::new();
        for qm in &self.queue_managers {
            if qm.name.is_empty() {
                return Err(BrokerConfigError::EmptyQueueManagerName);
            }
            if !managers.insert(qm.name.as_str()) {
                return Err(BrokerConfigError::DuplicateQueueManager(qm.name.clone()));
            }

            let mut queues = HashSet::new();
            for queue in &qm.queues {
                if queue.name.is_empty() {
                    return Err(BrokerConfigError::EmptyQueueName(qm.name.clone()));
                }
                if !queues.insert(queue.name.as_str()) {
                    return Err(BrokerConfigError::DuplicateQueue {
                        queue_manager: qm.name.clone(),
                        queue: queue.name.clone(),
                    });
                }
                if queue.capacity == 0 {
                    return Err(BrokerConfigError::ZeroCapacity(queue.name.clone()));
                }
            }
        }
        Ok(())
    }
}
