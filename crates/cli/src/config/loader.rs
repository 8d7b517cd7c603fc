use std::path::Path;
use thiserror::Error;

use courier_broker::BrokerConfigError;
use courier_producer::ProducerError;

use super::types::AppConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid producer config: {0}")]
    Producer(String),
    #[error("Invalid broker config: {0}")]
    Broker(#[from] BrokerConfigError),
}

impl From<ProducerError> for ConfigError {
    fn from(err: ProducerError) -> Self {
        ConfigError::Producer(err.to_string())
    }
}

/// Load configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<AppConfig, ConfigError> {
    let default_config = include_str!("default_config.json");
    load_config_from_str(default_config)
}

impl AppConfig {
    /// Validate both sections
    ///
    /// A producer pointing at a queue manager or queue the broker does not
    /// define is accepted here; the broker rejects it at connect or open
    /// time with the matching reason code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.producer.validate()?;
        self.broker.validate()?;
        Ok(())
    }
}
