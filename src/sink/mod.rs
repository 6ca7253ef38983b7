pub mod graphite;
pub mod log;

pub use graphite::GraphiteSink;
pub use log::LogSink;
