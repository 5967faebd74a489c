//! Snapshot stage: the most recent row as (field, display value) pairs.

use serde::{Deserialize, Serialize};

use super::filter::FilteredSeries;
use crate::domain::{ColumnKind, FieldValue, Observation};

/// One line of the latest-data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub value: String,
}

impl SnapshotEntry {
    fn new(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Numbers are shown with exactly two decimals.
pub fn format_number(v: f64) -> String {
    format!("{v:.2}")
}

/// Fields of the last row, in the dataset's column order.
///
/// Fields the row does not carry (absent OHLC values, empty extra cells,
/// no instrument) are skipped. An empty series gives an empty snapshot.
pub fn latest_snapshot(series: &FilteredSeries<'_>) -> Vec<SnapshotEntry> {
    let Some(row) = series.last() else {
        return Vec::new();
    };

    let mut extras = row.extras.iter();
    series
        .layout()
        .columns()
        .iter()
        .filter_map(|column| {
            let value = match column.kind {
                ColumnKind::Extra => extras.next().and_then(render_extra),
                kind => render_standard(row, kind),
            };
            value.map(|v| SnapshotEntry::new(&column.name, v))
        })
        .collect()
}

fn render_standard(row: &Observation, kind: ColumnKind) -> Option<String> {
    match kind {
        ColumnKind::Instrument => row.instrument.clone(),
        ColumnKind::Timestamp => Some(row.date.format("%Y-%m-%d").to_string()),
        ColumnKind::Open => row.open.map(format_number),
        ColumnKind::High => row.high.map(format_number),
        ColumnKind::Low => row.low.map(format_number),
        ColumnKind::Close => Some(format_number(row.close)),
        ColumnKind::Extra => None,
    }
}

fn render_extra(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Number(v) => Some(format_number(*v)),
        FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Missing => None,
    }
}
