use std::future::Future;
use std::sync::Arc;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use crate::config::AggregationConfig;
use crate::error::{Error, Result};
use crate::interfaces::aggregate_sink::AggregateSink;
use crate::interfaces::event_source::EventSourceFactory;
use crate::pipeline::worker::{PartitionWorker, WorkerReport};

/// Aggregation Supervisor - one worker per partition, synchronized shutdown
///
/// ## Usage
/// ```rust,ignore
/// let supervisor = AggregationSupervisor::new(factory, sink, config.aggregation);
///
/// // Blocks until the shutdown future resolves and every worker flushed
/// let reports = supervisor.run(tokio::signal::ctrl_c()).await?;
/// ```
pub struct AggregationSupervisor {
    factory: Arc<dyn EventSourceFactory>,
    sink: Arc<dyn AggregateSink>,
    config: AggregationConfig,
}

struct WorkerHandle {
    partition: i32,
    stop: CancellationToken,
    handle: JoinHandle<WorkerReport>,
}

/// Workers spawned by `AggregationSupervisor::start`.
pub struct RunningPipeline {
    workers: Vec<WorkerHandle>,
}

impl AggregationSupervisor {
    pub fn new(
        factory: Arc<dyn EventSourceFactory>,
        sink: Arc<dyn AggregateSink>,
        config: AggregationConfig,
    ) -> Self {
        AggregationSupervisor {
            factory,
            sink,
            config,
        }
    }

    /// Starts the workers, waits for `shutdown`, then stops every worker and
    /// returns only once all of them flushed their partial windows.
    pub async fn run<F>(&self, shutdown: F) -> Result<Vec<WorkerReport>>
    where
        F: Future,
    {
        let pipeline = self.start().await?;

        shutdown.await;
        info!("Shutdown requested");

        Ok(pipeline.shutdown().await)
    }

    /// Attaches and spawns one worker per partition in `0..partitions`.
    ///
    /// A partition that cannot be attached is logged and skipped; the others
    /// keep running. Fails only when no partition could be attached.
    pub async fn start(&self) -> Result<RunningPipeline> {
        let mut workers = Vec::new();

        for partition in 0..self.config.partitions {
            let source = match self.factory.attach(partition).await {
                Ok(source) => source,
                Err(e) => {
                    error!("Partition {} not started: {}", partition, e);
                    continue;
                }
            };

            let stop = CancellationToken::new();
            let worker = PartitionWorker::new(
                source,
                Arc::clone(&self.sink),
                self.config.interval(),
                self.config.poll_timeout(),
                stop.clone(),
            );

            if worker.partition() != partition {
                error!(
                    "Source attached for partition {} reports partition {}, not started",
                    partition,
                    worker.partition()
                );
                continue;
            }

            let handle = tokio::spawn(worker.run());
            info!("Spawned worker for partition {}", partition);

            workers.push(WorkerHandle {
                partition,
                stop,
                handle,
            });
        }

        if workers.is_empty() {
            return Err(Error::NoPartitionsAttached);
        }

        info!(
            "Aggregating {} of {} partitions with interval {:?}",
            workers.len(),
            self.config.partitions,
            self.config.interval()
        );
        Ok(RunningPipeline { workers })
    }
}

impl RunningPipeline {
    pub fn active_worker_count(&self) -> usize {
        self.workers.iter().filter(|w| !w.handle.is_finished()).count()
    }

    pub fn partitions(&self) -> Vec<i32> {
        self.workers.iter().map(|w| w.partition).collect()
    }

    /// Signals every worker to stop and waits for all of them to finish.
    ///
    /// Workers drain concurrently and in no particular order. A worker that
    /// panicked is logged and has no report.
    pub async fn shutdown(self) -> Vec<WorkerReport> {
        info!(
            "Stopping {} partition workers ({} still running)",
            self.workers.len(),
            self.active_worker_count()
        );

        for worker in &self.workers {
            worker.stop.cancel();
        }

        let (partitions, handles): (Vec<_>, Vec<_>) = self.workers
            .into_iter()
            .map(|w| (w.partition, w.handle))
            .unzip();

        let mut reports = Vec::with_capacity(handles.len());
        for (partition, joined) in partitions.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => error!("Worker for partition {} failed: {}", partition, e),
            }
        }

        let aggregates: u64 = reports.iter().map(|r| r.aggregates_emitted).sum();
        info!("All {} workers stopped, {} aggregates emitted", reports.len(), aggregates);
        reports
    }
}
