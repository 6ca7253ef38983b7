pub mod consumer;
pub mod producer;

pub use consumer::{KafkaPartitionSource, KafkaSourceFactory};
pub use producer::KafkaEntryProducer;
