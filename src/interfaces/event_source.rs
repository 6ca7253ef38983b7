use std::time::Duration;
use async_trait::async_trait;
use crate::error::{Error, Result};

/// Result of one bounded poll of a partition.
#[derive(Debug)]
pub enum PollOutcome {
    Payload(Vec<u8>),
    Timeout,
    TransportError(Error),
}

/// Source of raw payloads restricted to one partition.
#[async_trait]
pub trait EventSource: Send {
    fn partition(&self) -> i32;

    /// Waits at most `timeout` for the next payload.
    async fn poll_next(&mut self, timeout: Duration) -> PollOutcome;

    /// Gives up the partition assignment.
    fn release(&mut self) -> Result<()>;
}

/// Attaches a source to a single partition.
#[async_trait]
pub trait EventSourceFactory: Send + Sync {
    async fn attach(&self, partition: i32) -> Result<Box<dyn EventSource>>;
}
