use async_trait::async_trait;
use crate::error::Result;
use crate::types::aggregate::Aggregate;

/// Destination of completed aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregateSink: Send + Sync {
    async fn write(&self, aggregate: &Aggregate) -> Result<()>;
}
