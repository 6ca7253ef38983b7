use std::time::Duration;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use crate::config::KafkaConfig;
use crate::error::{Error, Result};

/// Publishes raw entry payloads to an explicit partition of the topic.
pub struct KafkaEntryProducer {
    producer: FutureProducer,
    topic: String,
}

impl KafkaEntryProducer {
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .set("compression.type", "lz4")
            .create()
            .map_err(|e| Error::KafkaError(e.to_string()))?;

        Ok(KafkaEntryProducer {
            producer,
            topic: config.topic.clone(),
        })
    }

    /// Resolves once the broker acknowledged delivery.
    pub async fn produce(&self, payload: &[u8], key: &str, partition: i32) -> Result<()> {
        let record = FutureRecord::to(&self.topic)
            .payload(payload)
            .key(key)
            .partition(partition);

        self.producer
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(e, _)| Error::KafkaError(e.to_string()))?;

        Ok(())
    }
}
