use uuid::Uuid;
use std::fmt;

/// Identifier of a fuel station as published on the topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StationId(pub Uuid);

impl StationId {
    pub fn new() -> Self {
        StationId(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(StationId(Uuid::parse_str(s)?))
    }
}

impl Default for StationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
