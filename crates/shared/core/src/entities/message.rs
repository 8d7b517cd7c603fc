use serde::{Deserialize, Serialize};

use super::record::Record;

/// Payload format tag carried in the message descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    /// Character data
    #[default]
    String,
    /// Opaque bytes
    None,
}

impl MessageFormat {
    /// Eight-character descriptor tag
    pub fn tag(&self) -> &'static str {
        match self {
            MessageFormat::String => "MQSTR   ",
            MessageFormat::None => "        ",
        }
    }
}

/// How message and correlation identifiers are assigned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Broker generates fresh ids on every put
    #[default]
    NewPerMessage,
    /// Ids are left unset
    Unset,
}

/// A message ready for submission
///
/// Built from a [`Record`] at submission time. A retry resubmits the same
/// `Message`; identifiers are assigned by the broker per put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
    pub format: MessageFormat,
    pub id_policy: IdPolicy,
}

impl Message {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            format: MessageFormat::String,
            id_policy: IdPolicy::NewPerMessage,
        }
    }

    pub fn from_record(record: &Record) -> Self {
        Self::new(record.as_bytes())
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_keeps_bytes() {
        let record = Record::from("42\r\n");
        let message = Message::from_record(&record);
        assert_eq!(message.payload(), b"42\r\n");
        assert_eq!(message.format, MessageFormat::String);
        assert_eq!(message.id_policy, IdPolicy::NewPerMessage);
    }

    #[test]
    fn test_format_tag_is_eight_chars() {
        assert_eq!(MessageFormat::String.tag().len(), 8);
        assert_eq!(MessageFormat::None.tag().len(), 8);
    }
}
