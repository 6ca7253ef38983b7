use std::time::Duration;
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::{Offset, TopicPartitionList};
use crate::config::KafkaConfig;
use crate::error::{Error, Result};
use crate::interfaces::event_source::{EventSource, EventSourceFactory, PollOutcome};

/// Consumer assigned to exactly one partition of the entry topic.
pub struct KafkaPartitionSource {
    consumer: StreamConsumer,
    topic: String,
    partition: i32,
}

impl KafkaPartitionSource {
    pub fn attach(config: &KafkaConfig, partition: i32) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.partition.eof", "false")
            .create()
            .map_err(|e| Error::AttachFailed {
                partition,
                reason: e.to_string(),
            })?;

        let offset = if config.from_beginning {
            Offset::Beginning
        } else {
            Offset::Stored
        };

        let mut assignment = TopicPartitionList::new();
        assignment
            .add_partition_offset(&config.topic, partition, offset)
            .map_err(|e| Error::AttachFailed {
                partition,
                reason: e.to_string(),
            })?;

        consumer.assign(&assignment)
            .map_err(|e| Error::AttachFailed {
                partition,
                reason: e.to_string(),
            })?;

        tracing::info!("Consumer attached to {}/{}, waiting for events", config.topic, partition);

        Ok(KafkaPartitionSource {
            consumer,
            topic: config.topic.clone(),
            partition,
        })
    }
}

#[async_trait]
impl EventSource for KafkaPartitionSource {
    fn partition(&self) -> i32 {
        self.partition
    }

    async fn poll_next(&mut self, timeout: Duration) -> PollOutcome {
        match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Err(_) => PollOutcome::Timeout,
            Ok(Err(e)) => PollOutcome::TransportError(Error::KafkaError(e.to_string())),
            Ok(Ok(message)) => {
                PollOutcome::Payload(message.payload().map(<[u8]>::to_vec).unwrap_or_default())
            }
        }
    }

    fn release(&mut self) -> Result<()> {
        self.consumer.unassign()
            .map_err(|e| Error::KafkaError(e.to_string()))?;
        tracing::info!("Consumer released {}/{}", self.topic, self.partition);
        Ok(())
    }
}

pub struct KafkaSourceFactory {
    config: KafkaConfig,
}

impl KafkaSourceFactory {
    pub fn new(config: KafkaConfig) -> Self {
        KafkaSourceFactory { config }
    }
}

#[async_trait]
impl EventSourceFactory for KafkaSourceFactory {
    async fn attach(&self, partition: i32) -> Result<Box<dyn EventSource>> {
        let source = KafkaPartitionSource::attach(&self.config, partition)?;
        Ok(Box::new(source))
    }
}
