//! Producer configuration
//!
//! Serde types for the `producer` section of the config file, with defaults
//! matching a single queue manager / single queue setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ProducerError;
use crate::retry::RetryPolicy;

/// Retry settings as written in config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_progress_every")]
    pub progress_every: u64,

    /// Unset means retry without limit
    #[serde(default)]
    pub max_attempts: Option<u64>,

    /// Unset means no per-record timeout
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_progress_every() -> u64 {
    10
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            progress_every: default_progress_every(),
            max_attempts: None,
            timeout_ms: None,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            progress_every: self.progress_every,
            max_attempts: self.max_attempts,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Producer section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Target queue manager
    #[serde(default = "default_queue_manager")]
    pub queue_manager: String,

    /// Target queue
    #[serde(default = "default_destination")]
    pub destination: String,

    /// File holding `<user-id> <password>`
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Line-delimited data file
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_queue_manager() -> String {
    "QM_S1558".to_string()
}

fn default_destination() -> String {
    "DEV.Q1".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("mqusers")
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.txt")
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            queue_manager: default_queue_manager(),
            destination: default_destination(),
            credentials_path: default_credentials_path(),
            data_path: default_data_path(),
            retry: RetryConfig::default(),
        }
    }
}

impl ProducerConfig {
    /// Check the broker binding names are present
    pub fn validate(&self) -> Result<(), ProducerError> {
        if self.queue_manager.trim().is_empty() {
            return Err(ProducerError::Config(
                "queue_manager must not be empty".to_string(),
            ));
        }
        if self.destination.trim().is_empty() {
            return Err(ProducerError::Config(
                "destination must not be empty".to_string(),
            ));
        }
        if self.retry.poll_interval_ms == 0 {
            return Err(ProducerError::Config(
                "retry.poll_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProducerConfig::default();
        assert_eq!(config.queue_manager, "QM_S1558");
        assert_eq!(config.destination, "DEV.Q1");
        assert_eq!(config.retry.poll_interval_ms, 500);
        assert!(config.retry.max_attempts.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"destination": "SENSORS.IN", "retry": {"max_attempts": 20}}"#;
        let config: ProducerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.queue_manager, "QM_S1558");
        assert_eq!(config.destination, "SENSORS.IN");
        assert_eq!(config.retry.progress_every, 10);
        assert_eq!(config.retry.max_attempts, Some(20));
    }

    #[test]
    fn test_retry_policy_conversion() {
        let retry = RetryConfig {
            poll_interval_ms: 250,
            progress_every: 4,
            max_attempts: Some(8),
            timeout_ms: Some(1_000),
        };
        let policy = retry.policy();
        assert_eq!(policy.poll_interval, Duration::from_millis(250));
        assert_eq!(policy.progress_every, 4);
        assert_eq!(policy.max_attempts, Some(8));
        assert_eq!(policy.timeout, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        let config = ProducerConfig {
            destination: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ProducerError::Config(_))));

        let config = ProducerConfig {
            queue_manager: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ProducerError::Config(_))));
    }
}
