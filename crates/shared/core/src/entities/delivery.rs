use serde::{Deserialize, Serialize};

use crate::{CallStatus, CompletionCode, ReasonCode};

/// Classified result of one put attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// Broker accepted the message
    Success,
    /// Destination is full; the same message may be retried later
    ResourceFull(ReasonCode),
    /// Any other failure; the message is not retried
    OtherFailure(ReasonCode),
}

impl DeliveryOutcome {
    /// Classify a put status
    ///
    /// A warning completion still means the message was put.
    pub fn classify(status: CallStatus) -> Self {
        match status.completion {
            CompletionCode::Ok | CompletionCode::Warning => DeliveryOutcome::Success,
            CompletionCode::Failed if status.reason.is_resource_full() => {
                DeliveryOutcome::ResourceFull(status.reason)
            }
            CompletionCode::Failed => DeliveryOutcome::OtherFailure(status.reason),
        }
    }

    pub fn is_resource_full(&self) -> bool {
        matches!(self, DeliveryOutcome::ResourceFull(_))
    }
}

impl From<CallStatus> for DeliveryOutcome {
    fn from(status: CallStatus) -> Self {
        DeliveryOutcome::classify(status)
    }
}

/// Terminal state of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordDisposition {
    /// Delivered after `retries` backpressure retries
    Sent { retries: u64 },
    /// Rejected with a non-backpressure reason
    Dropped { reason: ReasonCode },
    /// Retry budget ran out while the destination stayed full
    Abandoned { retries: u64, reason: ReasonCode },
}

impl RecordDisposition {
    pub fn is_sent(&self) -> bool {
        matches!(self, RecordDisposition::Sent { .. })
    }
}

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub records_read: u64,
    pub records_sent: u64,
    pub records_dropped: u64,
    pub records_abandoned: u64,
    /// Backpressure retries across all records
    pub retries: u64,
}

impl DeliveryStats {
    pub fn record(&mut self, disposition: RecordDisposition) {
        match disposition {
            RecordDisposition::Sent { .. } => self.records_sent += 1,
            RecordDisposition::Dropped { .. } => self.records_dropped += 1,
            RecordDisposition::Abandoned { .. } => self.records_abandoned += 1,
        }
    }

    /// Records read but not delivered
    pub fn undelivered(&self) -> u64 {
        self.records_read - self.records_sent
    }

    /// True when every record read was delivered
    pub fn is_complete(&self) -> bool {
        self.records_sent == self.records_read
    }
}
