pub mod ids;
pub mod timestamp;
pub mod entry;
pub mod aggregate;
pub mod partition;

pub use aggregate::Aggregate;
pub use entry::{Entry, FuelPrices};
pub use ids::StationId;
pub use partition::partition_for_post_code;
