mod credentials;
mod delivery;
mod handles;
mod message;
mod record;

pub use credentials::Credentials;
pub use delivery::{DeliveryOutcome, DeliveryStats, RecordDisposition};
pub use handles::{
    Acquired, ConnectionHandle, DestinationState, ObjectHandle, OpenMode, SessionState,
};
pub use message::{IdPolicy, Message, MessageFormat};
pub use record::Record;
