//! Courier Producer
//!
//! Forwards a line-delimited data source to one queue, one message per line.
//!
//! ## Architecture
//!
//! ```text
//!            Orchestrator
//!                 │
//!   ┌─────────────┼──────────────────┐
//!   ▼             ▼                  ▼
//! SessionManager  DestinationHandle  DeliveryEngine ◄── RecordSource
//!   │ connect     │ open/close        │ put, classify, retry
//!   └─────────────┴───────────────────┘
//!                 │
//!           BrokerGateway (port)
//! ```
//!
//! ## Failure handling
//!
//! - Connect, open, credential and data-source failures are fatal and
//!   surface as [`ProducerError`] after the session and destination guards
//!   have released.
//! - A full destination is retried at a fixed interval per [`RetryPolicy`].
//! - Any other put failure drops that record and the run continues.

pub mod config;
pub mod credentials;
pub mod delivery;
pub mod destination;
pub mod error;
pub mod orchestrator;
pub mod retry;
pub mod session;
pub mod source;

// Re-export commonly used types
pub use config::{ProducerConfig, RetryConfig};
pub use delivery::{DeliveryEngine, Submitter};
pub use destination::DestinationHandle;
pub use error::{LOCAL_FAILURE_EXIT_CODE, ProducerError, Stage};
pub use orchestrator::{Orchestrator, RunReport};
pub use retry::{RetryPolicy, ThreadSleeper};
pub use session::{Session, SessionManager};
pub use source::{LineSource, MemorySource};
