use serde::{Deserialize, Serialize};

pub mod aggregation;
pub mod graphite;
pub mod kafka;
pub mod loader;

pub use aggregation::AggregationConfig;
pub use graphite::{GraphiteConfig, GraphiteProtocol};
pub use kafka::KafkaConfig;
pub use loader::AppConfig;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}
