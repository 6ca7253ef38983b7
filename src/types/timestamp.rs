use chrono::{DateTime, FixedOffset};

/// Wire format of `observedAt`: millisecond precision and a `±hh:mm` offset,
/// e.g. `2021-03-01T09:00:00.000+01:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

pub type ObservedAt = DateTime<FixedOffset>;

pub fn parse_observed_at(value: &str) -> Result<ObservedAt, chrono::ParseError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

pub fn format_observed_at(value: &ObservedAt) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}
