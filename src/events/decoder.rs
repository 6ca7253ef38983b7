use serde::Deserialize;
use crate::error::DecodeError;
use crate::types::entry::{Entry, FuelPrices};
use crate::types::ids::StationId;
use crate::types::timestamp::parse_observed_at;

/// Shape of one price record on the topic.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEntry {
    pub date: String,
    pub station: String,
    #[serde(rename = "postCode")]
    pub post_code: String,
    #[serde(rename = "pDiesel")]
    pub p_diesel: f64,
    #[serde(rename = "pE5")]
    pub p_e5: f64,
    #[serde(rename = "pE10")]
    pub p_e10: f64,
}

/// Decodes one raw payload into an `Entry`.
///
/// Prices are passed through without validation.
pub fn decode(payload: &[u8]) -> Result<Entry, DecodeError> {
    let raw: RawEntry = serde_json::from_slice(payload)
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let station = StationId::from_string(&raw.station)
        .map_err(|e| DecodeError::InvalidStation {
            value: raw.station.clone(),
            reason: e.to_string(),
        })?;

    let observed_at = parse_observed_at(&raw.date)
        .map_err(|e| DecodeError::InvalidTimestamp {
            value: raw.date.clone(),
            reason: e.to_string(),
        })?;

    Ok(Entry {
        observed_at,
        station,
        post_code: raw.post_code,
        prices: FuelPrices::new(raw.p_diesel, raw.p_e5, raw.p_e10),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::format_observed_at;

    const STATION: &str = "51d4b55e-a095-1aa0-e100-80009459e03a";

    fn payload(date: &str, station: &str) -> Vec<u8> {
        format!(
            r#"{{"date":"{}","station":"{}","postCode":"70173","pDiesel":1.499,"pE5":1.629,"pE10":1.569}}"#,
            date, station
        )
        .into_bytes()
    }

    #[test]
    fn decodes_well_formed_payload() {
        let entry = decode(&payload("2021-03-01T09:00:00.000+01:00", STATION)).unwrap();

        assert_eq!(entry.station.to_string(), STATION);
        assert_eq!(entry.post_code, "70173");
        assert_eq!(entry.prices, FuelPrices::new(1.499, 1.629, 1.569));
        assert_eq!(format_observed_at(&entry.observed_at), "2021-03-01T09:00:00.000+01:00");
    }

    #[test]
    fn rejects_structurally_invalid_payload() {
        assert!(matches!(decode(b"not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(b""), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode(br#"{"date":"2021-03-01T09:00:00.000+01:00"}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_invalid_station() {
        let err = decode(&payload("2021-03-01T09:00:00.000+01:00", "station-42")).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidStation { ref value, .. } if value == "station-42"));
    }

    #[test]
    fn rejects_timestamp_in_other_format() {
        let err = decode(&payload("2021-03-01 09:00:00", STATION)).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTimestamp { .. }));
    }

    #[test]
    fn passes_non_positive_prices_through() {
        let raw = format!(
            r#"{{"date":"2021-03-01T09:00:00.000+01:00","station":"{}","postCode":"7","pDiesel":0,"pE5":-1.0,"pE10":0.0}}"#,
            STATION
        );
        let entry = decode(raw.as_bytes()).unwrap();
        assert_eq!(entry.prices, FuelPrices::new(0.0, -1.0, 0.0));
    }
}
