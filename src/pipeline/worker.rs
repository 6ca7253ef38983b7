use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use crate::error::{DecodeError, Error};
use crate::events::decoder::decode;
use crate::interfaces::aggregate_sink::AggregateSink;
use crate::interfaces::event_source::{EventSource, PollOutcome};
use crate::observability::metrics::{
    inc, AGGREGATES_EMITTED, DECODE_FAILURES, ENTRIES_BUFFERED, SINK_FAILURES, TRANSPORT_ERRORS,
};
use crate::observability::tracing::trace_partition_worker;
use crate::types::entry::Entry;
use crate::window::buffer::WindowBuffer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkerState {
    #[default]
    Running,
    Draining,
    Stopped,
}

/// What one iteration of the loop received, already decoded.
#[derive(Debug)]
pub enum WorkerEvent {
    Decoded(Entry),
    Malformed(DecodeError),
    Timeout,
    Transport(Error),
}

/// Counters a worker hands back to the supervisor once it stopped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub partition: i32,
    pub entries_buffered: u64,
    pub decode_failures: u64,
    pub transport_errors: u64,
    pub aggregates_emitted: u64,
    pub sink_failures: u64,
    pub final_state: WorkerState,
}

/// Consumes one partition into its window and flushes full windows to the sink.
pub struct PartitionWorker {
    partition: i32,
    source: Box<dyn EventSource>,
    sink: Arc<dyn AggregateSink>,
    buffer: WindowBuffer,
    poll_timeout: Duration,
    stop: CancellationToken,
    state: WorkerState,
    report: WorkerReport,
}

impl PartitionWorker {
    pub fn new(
        source: Box<dyn EventSource>,
        sink: Arc<dyn AggregateSink>,
        interval: Duration,
        poll_timeout: Duration,
        stop: CancellationToken,
    ) -> Self {
        let partition = source.partition();
        PartitionWorker {
            partition,
            source,
            sink,
            buffer: WindowBuffer::new(partition, interval),
            poll_timeout,
            stop,
            state: WorkerState::Running,
            report: WorkerReport {
                partition,
                ..WorkerReport::default()
            },
        }
    }

    pub fn partition(&self) -> i32 {
        self.partition
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn report(&self) -> &WorkerReport {
        &self.report
    }

    /// Runs until the stop signal fires, then flushes the partial window.
    pub async fn run(self) -> WorkerReport {
        let span = trace_partition_worker(self.partition);
        self.run_to_completion().instrument(span).await
    }

    async fn run_to_completion(mut self) -> WorkerReport {
        tracing::info!("Partition worker started");

        // The stop signal is checked before every blocking poll, so shutdown
        // waits at most one poll timeout plus one processing step.
        while !self.stop.is_cancelled() {
            let event = self.next_event().await;
            self.handle(event).await;
        }

        self.finish().await;
        self.report
    }

    /// Polls the source once and decodes whatever arrived.
    pub async fn next_event(&mut self) -> WorkerEvent {
        match self.source.poll_next(self.poll_timeout).await {
            PollOutcome::Timeout => WorkerEvent::Timeout,
            PollOutcome::TransportError(e) => WorkerEvent::Transport(e),
            PollOutcome::Payload(payload) => match decode(&payload) {
                Ok(entry) => WorkerEvent::Decoded(entry),
                Err(e) => {
                    tracing::debug!("Cannot decode payload '{}'", String::from_utf8_lossy(&payload));
                    WorkerEvent::Malformed(e)
                }
            },
        }
    }

    pub async fn handle(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Timeout => {}
            WorkerEvent::Transport(e) => {
                // The source recovers on its own; keep polling.
                self.report.transport_errors += 1;
                inc(&TRANSPORT_ERRORS, self.partition);
                tracing::warn!("Consumer error: {}", e);
            }
            WorkerEvent::Malformed(e) => {
                self.report.decode_failures += 1;
                inc(&DECODE_FAILURES, self.partition);
                tracing::warn!("Dropping payload: {}", e);
            }
            WorkerEvent::Decoded(entry) => {
                tracing::trace!(station = %entry.station, post_code = %entry.post_code, "Entry buffered");
                self.buffer.append(entry);
                self.report.entries_buffered += 1;
                inc(&ENTRIES_BUFFERED, self.partition);

                if !self.buffer.is_empty() && self.buffer.is_full() {
                    self.flush().await;
                }
            }
        }
    }

    /// DRAINING then STOPPED: flush whatever is buffered, even a window
    /// shorter than the interval, then release the partition.
    async fn finish(&mut self) {
        self.state = WorkerState::Draining;
        tracing::info!("Stop signal received, draining {} buffered entries", self.buffer.len());

        if !self.buffer.is_empty() {
            self.flush().await;
        }

        self.state = WorkerState::Stopped;
        self.report.final_state = self.state;
        if let Err(e) = self.source.release() {
            tracing::warn!("Failed to release partition: {}", e);
        }
        tracing::info!(
            aggregates = self.report.aggregates_emitted,
            entries = self.report.entries_buffered,
            "Partition worker stopped"
        );
    }

    /// Drains the window and hands the aggregate to the sink. Sink failures are
    /// logged and the aggregate is not retried.
    async fn flush(&mut self) {
        let Some(aggregate) = self.buffer.drain() else {
            return;
        };

        self.report.aggregates_emitted += 1;
        inc(&AGGREGATES_EMITTED, self.partition);
        tracing::debug!("Aggregated window {}", aggregate);

        if let Err(e) = self.sink.write(&aggregate).await {
            self.report.sink_failures += 1;
            inc(&SINK_FAILURES, self.partition);
            tracing::error!("Error while sending aggregate {}: {}", aggregate, e);
        }
    }
}
