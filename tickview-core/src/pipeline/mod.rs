//! Derivation pipeline: (dataset, selection) → displayed artifacts.
//!
//! Every stage is a pure function. The filter stage produces a
//! [`FilteredSeries`]; the metrics, series and snapshot stages read only
//! from it. Stages never fail: sparse or empty input yields zero or absent
//! values.

pub mod filter;
pub mod metrics;
pub mod series;
pub mod snapshot;

pub use filter::{filter, FilteredSeries};
pub use metrics::{change, latest_close, percent_change, ChangeDirection};
pub use series::{
    build_chart_series, build_chart_series_with, ChartSeries, OhlcPoint, OVERLAY_WINDOW,
};
pub use snapshot::{format_number, latest_snapshot, SnapshotEntry};

/// Single-instrument dataset from close prices, one row per day from 2024-01-02.
///
/// OHL are derived: open = previous close, high/low = max/min(open, close) ± 1.
#[cfg(test)]
pub fn make_dataset(closes: &[f64]) -> crate::domain::Dataset {
    use crate::domain::{Dataset, Observation, RowLayout};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let rows = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Observation::new(base_date + chrono::Duration::days(i as i64), close)
                .with_instrument("TEST")
                .with_ohl(open, open.max(close) + 1.0, open.min(close) - 1.0)
        })
        .collect();
    Dataset::new(RowLayout::standard(true), rows).unwrap()
}

/// Selection covering every row of [`make_dataset`].
#[cfg(test)]
pub fn select_all() -> crate::domain::Selection {
    crate::domain::Selection::new(
        "TEST",
        chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2100, 1, 1).unwrap(),
    )
}
