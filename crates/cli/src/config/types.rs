use courier_broker::BrokerConfig;
use courier_producer::ProducerConfig;
use serde::{Deserialize, Serialize};

/// Root of the `courier-put` configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub producer: ProducerConfig,

    #[serde(default)]
    pub broker: BrokerConfig,
}
