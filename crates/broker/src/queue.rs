//! Channel-backed Queues
//!
//! Each queue is a crossbeam bounded channel. The channel capacity is the
//! queue's maximum depth, so a full channel is the broker's backpressure
//! signal.

use chrono::{DateTime, Utc};
use courier_core::{IdPolicy, Message, MessageFormat};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError, bounded};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use uuid::Uuid;

use crate::config::QueueConfig;

/// A message as stored on a queue
///
/// Wraps the submitted payload with the descriptor fields the queue manager
/// fills in at put time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub message_id: Uuid,
    pub correlation_id: Uuid,
    pub format: MessageFormat,
    /// Position on the queue, starting at 1
    pub sequence: u64,
    pub put_time: DateTime<Utc>,
    /// User id of the connection that put the message
    pub put_by: String,
    pub payload: Vec<u8>,
}

/// Why a put was refused by the queue itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Refusal {
    Inhibited,
    TooBig,
    Full,
    Broken,
}

/// A named queue owned by a queue manager
pub(crate) struct Queue {
    config: QueueConfig,
    tx: Sender<StoredMessage>,
    rx: Receiver<StoredMessage>,
    sequence: AtomicU64,
}

impl Queue {
    pub(crate) fn new(config: QueueConfig) -> Self {
        let (tx, rx) = bounded(config.capacity);
        Self {
            config,
            tx,
            rx,
            sequence: AtomicU64::new(0),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.config.name
    }

    pub(crate) fn depth(&self) -> usize {
        self.rx.len()
    }

    pub(crate) fn receiver(&self) -> QueueReceiver {
        QueueReceiver {
            queue: self.config.name.clone(),
            rx: self.rx.clone(),
        }
    }

    /// Store a message without blocking
    pub(crate) fn offer(&self, message: &Message, put_by: &str) -> Result<u64, Refusal> {
        if self.config.put_inhibited {
            return Err(Refusal::Inhibited);
        }
        if message.len() > self.config.max_message_length {
            return Err(Refusal::TooBig);
        }
        if self.tx.is_full() {
            return Err(Refusal::Full);
        }

        let (message_id, correlation_id) = match message.id_policy {
            IdPolicy::NewPerMessage => (Uuid::new_v4(), Uuid::new_v4()),
            IdPolicy::Unset => (Uuid::nil(), Uuid::nil()),
        };
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = StoredMessage {
            message_id,
            correlation_id,
            format: message.format,
            sequence,
            put_time: Utc::now(),
            put_by: put_by.to_string(),
            payload: message.payload().to_vec(),
        };

        match self.tx.try_send(stored) {
            Ok(()) => Ok(sequence),
            Err(TrySendError::Full(_)) => Err(Refusal::Full),
            Err(TrySendError::Disconnected(_)) => Err(Refusal::Broken),
        }
    }
}

/// Consumer end of a queue
///
/// Receives messages from the queue's bounded channel. Cloning yields
/// another competing consumer on the same queue.
#[derive(Clone)]
pub struct QueueReceiver {
    queue: String,
    rx: Receiver<StoredMessage>,
}

impl QueueReceiver {
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Take every available message, calling handler for each one
    ///
    /// Returns the count of messages processed. Never blocks.
    pub fn poll(&self, handler: &mut dyn FnMut(StoredMessage)) -> usize {
        let mut count = 0;
        while let Ok(message) = self.rx.try_recv() {
            handler(message);
            count += 1;
        }
        count
    }

    /// Take up to `max` messages without blocking
    pub fn take(&self, max: usize) -> Vec<StoredMessage> {
        let mut taken = Vec::new();
        while taken.len() < max {
            match self.rx.try_recv() {
                Ok(message) => taken.push(message),
                Err(_) => break,
            }
        }
        taken
    }

    /// Take every available message
    pub fn drain(&self) -> Vec<StoredMessage> {
        let mut drained = Vec::new();
        self.poll(&mut |message| drained.push(message));
        drained
    }

    /// Wait up to `timeout` for the next message
    pub fn recv_timeout(&self, timeout: Duration) -> Option<StoredMessage> {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Current queue depth
    pub fn depth(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
