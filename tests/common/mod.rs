#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use fuelagg::error::{Error, Result};
use fuelagg::interfaces::{AggregateSink, EventSource, EventSourceFactory, PollOutcome};
use fuelagg::types::Aggregate;

pub const STATION: &str = "51d4b55e-a095-1aa0-e100-80009459e03a";

/// Payload observed at `time` (hh:mm) on 2021-03-01, UTC+1.
pub fn entry_payload(time: &str, diesel: f64) -> PollOutcome {
    PollOutcome::Payload(
        format!(
            r#"{{"date":"2021-03-01T{}:00.000+01:00","station":"{}","postCode":"70173","pDiesel":{},"pE5":1.65,"pE10":1.59}}"#,
            time, STATION, diesel
        )
        .into_bytes(),
    )
}

pub fn unparseable_timestamp_payload() -> PollOutcome {
    PollOutcome::Payload(
        format!(
            r#"{{"date":"01.03.2021 09:30","station":"{}","postCode":"70173","pDiesel":1.0,"pE5":1.0,"pE10":1.0}}"#,
            STATION
        )
        .into_bytes(),
    )
}

/// Replays a fixed script, then only times out.
pub struct ScriptedSource {
    pub partition: i32,
    pub script: VecDeque<PollOutcome>,
    /// Cancelled once the script is exhausted.
    pub stop_when_exhausted: Option<CancellationToken>,
    pub exhausted: Arc<AtomicUsize>,
    pub released: Arc<Mutex<Vec<i32>>>,
    signalled: bool,
}

impl ScriptedSource {
    pub fn new(partition: i32, script: Vec<PollOutcome>) -> Self {
        ScriptedSource {
            partition,
            script: script.into(),
            stop_when_exhausted: None,
            exhausted: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(Mutex::new(Vec::new())),
            signalled: false,
        }
    }

    pub fn stopping(mut self, stop: CancellationToken) -> Self {
        self.stop_when_exhausted = Some(stop);
        self
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    fn partition(&self) -> i32 {
        self.partition
    }

    async fn poll_next(&mut self, timeout: Duration) -> PollOutcome {
        if let Some(outcome) = self.script.pop_front() {
            return outcome;
        }

        if !self.signalled {
            self.signalled = true;
            self.exhausted.fetch_add(1, Ordering::SeqCst);
            if let Some(stop) = &self.stop_when_exhausted {
                stop.cancel();
            }
        }
        tokio::time::sleep(timeout).await;
        PollOutcome::Timeout
    }

    fn release(&mut self) -> Result<()> {
        self.released.lock().unwrap().push(self.partition);
        Ok(())
    }
}

/// Hands out one scripted source per partition; listed partitions fail to attach.
pub struct ScriptedFactory {
    scripts: Mutex<HashMap<i32, Vec<PollOutcome>>>,
    failing: HashSet<i32>,
    /// Partitions whose source claims to own another partition.
    misrouted: HashMap<i32, i32>,
    pub exhausted: Arc<AtomicUsize>,
    pub released: Arc<Mutex<Vec<i32>>>,
}

impl ScriptedFactory {
    pub fn new(scripts: HashMap<i32, Vec<PollOutcome>>, failing: HashSet<i32>) -> Self {
        ScriptedFactory {
            scripts: Mutex::new(scripts),
            failing,
            misrouted: HashMap::new(),
            exhausted: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn misrouting(mut self, partition: i32, reported: i32) -> Self {
        self.misrouted.insert(partition, reported);
        self
    }

    /// Resolves once `sources` sources replayed their whole script.
    pub async fn wait_until_exhausted(exhausted: Arc<AtomicUsize>, sources: usize) {
        while exhausted.load(Ordering::SeqCst) < sources {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl EventSourceFactory for ScriptedFactory {
    async fn attach(&self, partition: i32) -> Result<Box<dyn EventSource>> {
        if self.failing.contains(&partition) {
            return Err(Error::AttachFailed {
                partition,
                reason: "broker unreachable".to_string(),
            });
        }

        let script = self.scripts.lock().unwrap().remove(&partition).unwrap_or_default();
        let reported = self.misrouted.get(&partition).copied().unwrap_or(partition);
        let mut source = ScriptedSource::new(reported, script);
        source.exhausted = Arc::clone(&self.exhausted);
        source.released = Arc::clone(&self.released);
        Ok(Box::new(source))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    aggregates: Mutex<Vec<Aggregate>>,
}

impl RecordingSink {
    pub fn aggregates(&self) -> Vec<Aggregate> {
        self.aggregates.lock().unwrap().clone()
    }
}

#[async_trait]
impl AggregateSink for RecordingSink {
    async fn write(&self, aggregate: &Aggregate) -> Result<()> {
        self.aggregates.lock().unwrap().push(aggregate.clone());
        Ok(())
    }
}
