use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// One worker per partition index in `0..partitions`.
    pub partitions: i32,
    pub interval_secs: u64,
    /// Upper bound on how long a worker waits for an event before it
    /// re-checks its stop signal.
    pub poll_timeout_ms: u64,
}

impl AggregationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        AggregationConfig {
            partitions: 10,
            interval_secs: 3600,  // 1 hour
            poll_timeout_ms: 100,
        }
    }
}
