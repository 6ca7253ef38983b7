use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts, Registry};
use crate::error::{Error, Result};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Ingestion metrics
    pub static ref ENTRIES_BUFFERED: IntCounterVec = IntCounterVec::new(
        Opts::new("entries_buffered_total", "Total number of decoded entries appended to a window"),
        &["partition"]
    ).expect("valid metric definition");

    pub static ref DECODE_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("decode_failures_total", "Total number of payloads dropped because they could not be decoded"),
        &["partition"]
    ).expect("valid metric definition");

    pub static ref TRANSPORT_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("transport_errors_total", "Total number of event source errors"),
        &["partition"]
    ).expect("valid metric definition");

    // Output metrics
    pub static ref AGGREGATES_EMITTED: IntCounterVec = IntCounterVec::new(
        Opts::new("aggregates_emitted_total", "Total number of aggregates handed to the sink"),
        &["partition"]
    ).expect("valid metric definition");

    pub static ref SINK_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("sink_failures_total", "Total number of aggregates the sink failed to persist"),
        &["partition"]
    ).expect("valid metric definition");
}

pub fn register_metrics() -> Result<()> {
    let collectors = [
        ENTRIES_BUFFERED.clone(),
        DECODE_FAILURES.clone(),
        TRANSPORT_ERRORS.clone(),
        AGGREGATES_EMITTED.clone(),
        SINK_FAILURES.clone(),
    ];

    for collector in collectors {
        match REGISTRY.register(Box::new(collector)) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(Error::MetricsError(e.to_string())),
        }
    }
    Ok(())
}

pub fn inc(counter: &IntCounterVec, partition: i32) {
    let label = partition.to_string();
    counter.with_label_values(&[label.as_str()]).inc();
}
