//! Courier In-process Broker
//!
//! A queue manager that lives inside the producer's process and implements
//! the [`courier_ports::BrokerGateway`] port:
//!
//! - **Queues**: crossbeam bounded channels; channel capacity is queue depth
//! - **Handles**: connection and object handles tracked in a mutex-guarded table
//! - **Drainer**: optional background consumer standing in for the remote side
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    BrokerGateway (port)                   │
//! │     connect · open · put · close · disconnect             │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                    InProcessBroker                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────┐  │
//! │  │ Queue manager│  │ Handle table │  │ Queue (bounded │  │
//! │  │  users/auth  │  │ conns / objs │  │  crossbeam)    │  │
//! │  └──────────────┘  └──────────────┘  └────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!                 QueueReceiver / Drainer
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use courier_broker::{BrokerConfig, InProcessBroker};
//! use courier_core::{Credentials, Message, OpenMode};
//! use courier_ports::BrokerGateway;
//!
//! let broker = InProcessBroker::from_config(&BrokerConfig::default())?;
//! let creds = Credentials::new("app", "secret").unwrap();
//! let conn = broker.connect("QM_S1558", &creds).handle.unwrap();
//! let obj = broker.open(conn, "DEV.Q1", OpenMode::Output).handle.unwrap();
//! broker.put(conn, obj, &Message::new("hello\n"));
//!
//! let received = broker.receiver("QM_S1558", "DEV.Q1").unwrap().drain();
//! ```

pub mod broker;
pub mod config;
pub mod drainer;
pub mod error;
pub mod queue;

pub use broker::InProcessBroker;
pub use config::{BrokerConfig, DrainConfig, QueueConfig, QueueManagerConfig, UserConfig};
pub use drainer::Drainer;
pub use error::BrokerConfigError;
pub use queue::{QueueReceiver, StoredMessage};
