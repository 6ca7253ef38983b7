pub mod supervisor;
pub mod worker;

pub use supervisor::{AggregationSupervisor, RunningPipeline};
pub use worker::{PartitionWorker, WorkerEvent, WorkerReport, WorkerState};
