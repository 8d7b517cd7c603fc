//! Background Drainer
//!
//! Plays the remote consumer: removes messages from queues at a fixed pace so
//! a producer facing a small queue sees backpressure clear over time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::DrainConfig;
use crate::queue::QueueReceiver;

/// Handle to a running drain thread
///
/// The thread stops when [`Drainer::stop`] is called or the handle is dropped.
pub struct Drainer {
    stop: Arc<AtomicBool>,
    drained: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl Drainer {
    /// Start draining the given queues
    pub fn spawn(receivers: Vec<QueueReceiver>, config: DrainConfig) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let drained = Arc::new(AtomicU64::new(0));
        let interval = Duration::from_millis(config.interval_ms);
        let batch = config.batch.max(1);

        let handle = {
            let stop = Arc::clone(&stop);
            let drained = Arc::clone(&drained);
            thread::spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    for receiver in &receivers {
                        let taken = receiver.take(batch).len() as u64;
                        if taken > 0 {
                            drained.fetch_add(taken, Ordering::Relaxed);
                            tracing::trace!(queue = receiver.queue(), taken, "drained");
                        }
                    }
                    thread::sleep(interval);
                }
            })
        };

        Self {
            stop,
            drained,
            handle: Some(handle),
        }
    }

    /// Messages removed so far
    pub fn drained(&self) -> u64 {
        self.drained.load(Ordering::Relaxed)
    }

    /// Stop the thread and return the total drained
    pub fn stop(mut self) -> u64 {
        self.shutdown();
        self.drained()
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("drain thread panicked");
            }
        }
    }
}

impl Drop for Drainer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
