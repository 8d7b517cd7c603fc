//! Courier Core Domain
//!
//! Pure domain types for the Courier queue producer.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Broker handles and lifecycle states
    Acquired,
    ConnectionHandle,
    // Credentials
    Credentials,
    // Delivery bookkeeping
    DeliveryOutcome,
    DeliveryStats,
    DestinationState,
    // Messages and records
    IdPolicy,
    Message,
    MessageFormat,
    ObjectHandle,
    OpenMode,
    Record,
    RecordDisposition,
    SessionState,
};
pub use values::{CallStatus, CompletionCode, ReasonCode};
