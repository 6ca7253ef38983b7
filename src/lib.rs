pub mod config;
pub mod error;
pub mod events;
pub mod event_log;
pub mod interfaces;
pub mod observability;
pub mod pipeline;
pub mod sink;
pub mod types;
pub mod window;

pub use error::{DecodeError, Error, Result};
