use std::time::Duration;
use crate::types::aggregate::Aggregate;
use crate::types::entry::{Entry, FuelPrices};

/// Ordered working set of one partition.
///
/// Entries are kept in arrival order; the buffer never sorts or deduplicates,
/// so "oldest" and "newest" are the first and last positions.
pub struct WindowBuffer {
    partition: i32,
    interval: Duration,
    entries: Vec<Entry>,
}

impl WindowBuffer {
    pub fn new(partition: i32, interval: Duration) -> Self {
        WindowBuffer {
            partition,
            interval,
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Span between the oldest and the newest entry, if any entry is held.
    pub fn span(&self) -> Option<chrono::TimeDelta> {
        let oldest = self.entries.first()?;
        let newest = self.entries.last()?;
        Some(newest.observed_at - oldest.observed_at)
    }

    /// True when the span strictly exceeds the interval.
    ///
    /// An empty buffer has no span and is never full; neither is a window
    /// whose newest entry predates its oldest.
    pub fn is_full(&self) -> bool {
        match self.span().map(|span| span.to_std()) {
            Some(Ok(span)) => span > self.interval,
            _ => false,
        }
    }

    /// Folds every held entry into one `Aggregate` and empties the buffer.
    ///
    /// Returns `None` for an empty buffer.
    pub fn drain(&mut self) -> Option<Aggregate> {
        let oldest = self.entries.first()?.observed_at;
        let entries = std::mem::take(&mut self.entries);
        let count = entries.len();

        let sum = entries.iter().fold(FuelPrices::default(), |acc, entry| {
            FuelPrices::new(
                acc.diesel + entry.prices.diesel,
                acc.e5 + entry.prices.e5,
                acc.e10 + entry.prices.e10,
            )
        });
        let n = count as f64;

        Some(Aggregate {
            timestamp: oldest,
            partition: self.partition,
            prices: FuelPrices::new(sum.diesel / n, sum.e5 / n, sum.e10 / n),
            sample_count: count,
        })
    }
}
