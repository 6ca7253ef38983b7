use crate::config::*;
use crate::error::{Error, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub kafka: KafkaConfig,
    pub graphite: GraphiteConfig,
    pub aggregation: AggregationConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Layers `config/default`, `config/{env}` and `FUELAGG_*` variables
    /// (e.g. `FUELAGG_KAFKA__BROKERS`) over the built-in defaults.
    pub fn load(env: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("FUELAGG")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        let app: AppConfig = config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kafka.brokers.trim().is_empty() {
            return Err(Error::ConfigError("kafka.brokers must not be empty".to_string()));
        }
        if self.kafka.topic.trim().is_empty() {
            return Err(Error::ConfigError("kafka.topic must not be empty".to_string()));
        }
        if self.aggregation.partitions <= 0 {
            return Err(Error::ConfigError(format!(
                "aggregation.partitions must be positive, got {}",
                self.aggregation.partitions
            )));
        }
        if self.aggregation.interval_secs == 0 {
            return Err(Error::ConfigError("aggregation.interval_secs must be positive".to_string()));
        }
        if self.aggregation.poll_timeout_ms == 0 {
            return Err(Error::ConfigError("aggregation.poll_timeout_ms must be positive".to_string()));
        }
        if self.graphite.connect_timeout_ms == 0 {
            return Err(Error::ConfigError("graphite.connect_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<AppConfig> {
        AppConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn empty_sources_yield_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.kafka.topic, "tankerkoenig");
        assert_eq!(config.aggregation.partitions, 10);
        assert_eq!(config.aggregation.interval().as_secs(), 3600);
        assert_eq!(config.aggregation.poll_timeout().as_millis(), 100);
        assert_eq!(config.graphite.protocol, GraphiteProtocol::Tcp);
        assert_eq!(config.graphite.address(), "localhost:2003");
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            [kafka]
            brokers = "10.0.0.1:9092"

            [graphite]
            protocol = "udp"
            prefix = "prices"

            [aggregation]
            partitions = 4
            interval_secs = 900
            "#,
        )
        .unwrap();

        assert_eq!(config.kafka.brokers, "10.0.0.1:9092");
        assert_eq!(config.kafka.group_id, "fuelagg");
        assert_eq!(config.graphite.protocol, GraphiteProtocol::Udp);
        assert_eq!(config.graphite.prefix, "prices");
        assert_eq!(config.aggregation.partitions, 4);
        assert_eq!(config.aggregation.interval_secs, 900);
    }

    #[test]
    fn rejects_non_positive_partitions() {
        let err = from_toml("[aggregation]\npartitions = 0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn rejects_zero_connect_timeout() {
        let err = from_toml("[graphite]\nconnect_timeout_ms = 0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(ref msg) if msg.contains("connect_timeout_ms")));
    }

    #[test]
    fn rejects_unknown_protocol() {
        assert!(from_toml("[graphite]\nprotocol = \"pickle\"\n").is_err());
    }
}
