use async_trait::async_trait;
use crate::error::Result;
use crate::interfaces::aggregate_sink::AggregateSink;
use crate::types::aggregate::Aggregate;

/// Logs aggregates instead of persisting them.
#[derive(Default)]
pub struct LogSink;

#[async_trait]
impl AggregateSink for LogSink {
    async fn write(&self, aggregate: &Aggregate) -> Result<()> {
        tracing::info!(
            metrics = ?aggregate.metrics(),
            timestamp = aggregate.unix_timestamp(),
            "Aggregate {}",
            aggregate
        );
        Ok(())
    }
}
