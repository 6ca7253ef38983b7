use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Event Log Errors
    #[error("Kafka error: {0}")]
    KafkaError(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("No partition for post code '{0}'")]
    Unpartitionable(String),

    #[error("Partition {partition} could not be attached: {reason}")]
    AttachFailed {
        partition: i32,
        reason: String,
    },

    #[error("No partition could be attached")]
    NoPartitionsAttached,

    // Sink Errors
    #[error("Sink error: {0}")]
    SinkError(String),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Metrics error: {0}")]
    MetricsError(String),

    // IO Errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a single payload could not be turned into an `Entry`.
///
/// Every variant is fatal to that payload only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Invalid station id '{value}': {reason}")]
    InvalidStation {
        value: String,
        reason: String,
    },

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        value: String,
        reason: String,
    },
}
