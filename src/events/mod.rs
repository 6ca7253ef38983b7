pub mod decoder;
pub mod router;

pub use decoder::{decode, RawEntry};
pub use router::route;
