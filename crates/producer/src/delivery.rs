//! Delivery engine
//!
//! Drains a [`RecordSource`] into a destination, one record at a time:
//!
//! ```text
//!   Pending ──submit──► Success ───────────────────────────► Sent
//!                  │
//!                  ├──► ResourceFull ─► sleep, resubmit ─┬─► Sent
//!                  │        ▲                            ├─► Dropped
//!                  │        └──────── still full ────────┤
//!                  │                                     └─► Abandoned (capped policy only)
//!                  └──► OtherFailure ──────────────────────► Dropped
//! ```
//!
//! A retried record resolves before the next record is read, so submission
//! order always matches source order.

use courier_core::{DeliveryOutcome, DeliveryStats, Message, Record, RecordDisposition};
use courier_ports::{RecordSource, Sleeper};

use crate::error::ProducerError;
use crate::retry::RetryPolicy;

/// Anything a message can be submitted to
pub trait Submitter {
    fn name(&self) -> &str;

    /// Submit once and classify the result
    fn submit(&self, message: &Message) -> DeliveryOutcome;
}

/// Per-record submit / classify / retry loop
pub struct DeliveryEngine<'a, D: Submitter + ?Sized, S: Sleeper + ?Sized> {
    destination: &'a D,
    sleeper: &'a S,
    policy: RetryPolicy,
    stats: DeliveryStats,
}

impl<'a, D: Submitter + ?Sized, S: Sleeper + ?Sized> DeliveryEngine<'a, D, S> {
    pub fn new(destination: &'a D, policy: RetryPolicy, sleeper: &'a S) -> Self {
        Self {
            destination,
            sleeper,
            policy,
            stats: DeliveryStats::default(),
        }
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Read the source to exhaustion, delivering every record
    ///
    /// Dropped and abandoned records do not stop the run. Only a read error
    /// on the source is returned; counters up to that point stay available
    /// through [`DeliveryEngine::stats`].
    pub fn run<R: RecordSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<DeliveryStats, ProducerError> {
        tracing::info!(
            source = %source.describe(),
            destination = self.destination.name(),
            retry_capped = self.policy.is_bounded(),
            "delivery started"
        );

        loop {
            let record = match source.next_record() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(
                        source = %source.describe(),
                        records_read = self.stats.records_read,
                        error = %err,
                        "reading data source failed"
                    );
                    return Err(ProducerError::SourceRead {
                        origin: source.describe(),
                        records_read: self.stats.records_read,
                        source: err,
                    });
                }
            };
            self.deliver(&record);
        }

        tracing::info!(
            records_read = self.stats.records_read,
            records_sent = self.stats.records_sent,
            records_dropped = self.stats.records_dropped,
            records_abandoned = self.stats.records_abandoned,
            retries = self.stats.retries,
            undelivered = self.stats.undelivered(),
            "delivery finished"
        );
        Ok(self.stats)
    }

    /// Deliver one record and tally its disposition
    pub fn deliver(&mut self, record: &Record) -> RecordDisposition {
        self.stats.records_read += 1;
        let index = self.stats.records_read;
        let message = Message::from_record(record);

        let disposition = self.submit_with_retry(index, &message);
        self.stats.record(disposition);
        disposition
    }

    fn submit_with_retry(&mut self, index: u64, message: &Message) -> RecordDisposition {
        let mut retries: u64 = 0;
        let mut outcome = self.destination.submit(message);

        loop {
            match outcome {
                DeliveryOutcome::Success => {
                    tracing::debug!(record = index, bytes = message.len(), retries, "sent");
                    return RecordDisposition::Sent { retries };
                }
                DeliveryOutcome::OtherFailure(reason) => {
                    tracing::warn!(
                        record = index,
                        reason = %reason,
                        "put failed, record dropped"
                    );
                    return RecordDisposition::Dropped { reason };
                }
                DeliveryOutcome::ResourceFull(reason) => {
                    if !self.policy.allows_retry(retries) {
                        tracing::warn!(
                            record = index,
                            retries,
                            reason = %reason,
                            "destination still full, retry budget exhausted, record abandoned"
                        );
                        return RecordDisposition::Abandoned { retries, reason };
                    }
                    if retries == 0 {
                        tracing::info!(
                            record = index,
                            destination = self.destination.name(),
                            interval_ms = self.policy.poll_interval.as_millis() as u64,
                            "destination full, waiting for space"
                        );
                    }

                    self.sleeper.sleep(self.policy.poll_interval);
                    retries += 1;
                    self.stats.retries += 1;

                    if self.policy.should_report(retries) {
                        tracing::info!(record = index, retries, "still retrying");
                    }
                    outcome = self.destination.submit(message);
                }
            }
        }
    }
}
