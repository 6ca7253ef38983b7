use crate::types::ids::StationId;
use crate::types::timestamp::ObservedAt;

/// Prices for the three fuel categories, in the currency unit of the feed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FuelPrices {
    pub diesel: f64,
    pub e5: f64,
    pub e10: f64,
}

impl FuelPrices {
    pub fn new(diesel: f64, e5: f64, e10: f64) -> Self {
        FuelPrices { diesel, e5, e10 }
    }
}

/// One observed price record for a station. Immutable once decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub observed_at: ObservedAt,
    pub station: StationId,
    pub post_code: String,
    pub prices: FuelPrices,
}
