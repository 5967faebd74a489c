//! Observation: one timestamped price row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value of an extra (non-OHLC) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Empty cell. A row does not carry a missing field.
    Missing,
}

impl FieldValue {
    /// Parse a raw cell: empty → `Missing`, numeric → `Number`, otherwise `Text`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return FieldValue::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) => FieldValue::Number(v),
            Err(_) => FieldValue::Text(raw.to_string()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

/// A single price observation for one instrument on one day.
///
/// `close` is always present. `open`/`high`/`low` may be absent when the
/// dataset only carries closes. `extras` is positional: the n-th entry
/// belongs to the n-th extra column of the dataset's [`RowLayout`](super::RowLayout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub instrument: Option<String>,
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub extras: Vec<FieldValue>,
}

impl Observation {
    /// Close-only observation with no instrument and no extras.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            instrument: None,
            date,
            open: None,
            high: None,
            low: None,
            close,
            extras: Vec::new(),
        }
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    pub fn with_ohl(mut self, open: f64, high: f64, low: f64) -> Self {
        self.open = Some(open);
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    pub fn with_extra(mut self, value: impl Into<FieldValue>) -> Self {
        self.extras.push(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_cells() {
        assert_eq!(FieldValue::parse(""), FieldValue::Missing);
        assert_eq!(FieldValue::parse("  "), FieldValue::Missing);
        assert_eq!(FieldValue::parse("12.5"), FieldValue::Number(12.5));
        assert_eq!(FieldValue::parse("NYSE"), FieldValue::Text("NYSE".into()));
    }

    #[test]
    fn builder_fills_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let obs = Observation::new(date, 103.0)
            .with_instrument("SPY")
            .with_ohl(100.0, 105.0, 98.0)
            .with_extra(50_000.0)
            .with_extra("NYSE");

        assert_eq!(obs.instrument.as_deref(), Some("SPY"));
        assert_eq!(obs.open, Some(100.0));
        assert_eq!(obs.high, Some(105.0));
        assert_eq!(obs.low, Some(98.0));
        assert_eq!(obs.extras.len(), 2);
    }

    #[test]
    fn observation_serialization_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let obs = Observation::new(date, 103.0).with_instrument("SPY");
        let json = serde_json::to_string(&obs).unwrap();
        let deser: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, deser);
    }
}
