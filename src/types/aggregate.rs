use std::collections::BTreeMap;
use std::fmt;
use crate::types::entry::FuelPrices;
use crate::types::partition::sanitize_metric_component;
use crate::types::timestamp::{format_observed_at, ObservedAt};

pub const METRIC_DIESEL: &str = "pDiesel";
pub const METRIC_E5: &str = "pE5";
pub const METRIC_E10: &str = "pE10";

/// Mean prices of one drained window.
///
/// `timestamp` is the `observed_at` of the oldest entry in the window, so the
/// aggregate is anchored to the start of the span it summarizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregate {
    pub timestamp: ObservedAt,
    pub partition: i32,
    pub prices: FuelPrices,
    pub sample_count: usize,
}

impl Aggregate {
    /// Seconds since the Unix epoch, shared by every metric of the batch.
    pub fn unix_timestamp(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Metric name (qualified by the partition key) to mean value.
    pub fn metrics(&self) -> BTreeMap<String, f64> {
        let key = sanitize_metric_component(&self.partition.to_string());
        BTreeMap::from([
            (format!("{}.{}", key, METRIC_DIESEL), self.prices.diesel),
            (format!("{}.{}", key, METRIC_E5), self.prices.e5),
            (format!("{}.{}", key, METRIC_E10), self.prices.e10),
        ])
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ timestamp: {}, partition: {}, pDiesel: {}, pE5: {}, pE10: {}, samples: {} }}",
            format_observed_at(&self.timestamp),
            self.partition,
            self.prices.diesel,
            self.prices.e5,
            self.prices.e10,
            self.sample_count,
        )
    }
}
