//! Courier Ports
//!
//! Port definitions (traits) for the Courier queue producer.
//! These define the boundaries between the delivery logic and the
//! middleware, the data feed, and the passage of time.

mod gateway;
mod sleeper;
mod source;

pub use gateway::BrokerGateway;
pub use sleeper::Sleeper;
pub use source::RecordSource;
