pub mod event_source;
pub mod aggregate_sink;

pub use aggregate_sink::AggregateSink;
pub use event_source::{EventSource, EventSourceFactory, PollOutcome};
