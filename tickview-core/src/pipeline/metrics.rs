//! Metrics stage: latest close and change versus the prior observation.
//!
//! Policies for degenerate input:
//! - fewer than two rows: `change` and `percent_change` are exactly `0.0`
//! - prior close of `0.0`: `percent_change` is `0.0`
//! - any non-finite result (NaN closes in the data): reported as `0.0`

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::filter::FilteredSeries;

/// Sign of the latest change, used to pick the up/down marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    /// `Up` for zero or positive change.
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            ChangeDirection::Up
        } else {
            ChangeDirection::Down
        }
    }
}

/// Close of the most recent row, `None` for an empty series.
pub fn latest_close(series: &FilteredSeries<'_>) -> Option<f64> {
    series.last().map(|obs| obs.close)
}

/// Last close minus second-to-last close.
pub fn change(series: &FilteredSeries<'_>) -> f64 {
    match last_two_closes(series) {
        Some((prev, last)) => finite_or_zero(last - prev),
        None => 0.0,
    }
}

/// `change / previous close * 100`.
pub fn percent_change(series: &FilteredSeries<'_>) -> f64 {
    let Some((prev, last)) = last_two_closes(series) else {
        return 0.0;
    };
    if prev == 0.0 {
        warn!(last, "previous close is zero, percent change reported as 0");
        return 0.0;
    }
    finite_or_zero((last - prev) / prev * 100.0)
}

fn last_two_closes(series: &FilteredSeries<'_>) -> Option<(f64, f64)> {
    match series.rows() {
        [.., prev, last] => Some((prev.close, last.close)),
        _ => None,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use crate::pipeline::{filter, make_dataset, select_all};

    #[test]
    fn empty_series_is_zero() {
        let ds = make_dataset(&[]);
        let series = filter(&ds, &select_all());
        assert_eq!(change(&series), 0.0);
        assert_eq!(percent_change(&series), 0.0);
        assert_eq!(latest_close(&series), None);
    }

    #[test]
    fn single_row_is_zero() {
        let ds = make_dataset(&[100.0]);
        let series = filter(&ds, &select_all());
        assert_eq!(change(&series), 0.0);
        assert_eq!(percent_change(&series), 0.0);
        assert_eq!(latest_close(&series), Some(100.0));
    }

    #[test]
    fn change_from_100_to_105() {
        let ds = make_dataset(&[100.0, 105.0]);
        let series = filter(&ds, &select_all());
        assert_approx(change(&series), 5.0, DEFAULT_EPSILON);
        assert_approx(percent_change(&series), 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn uses_only_last_two_rows() {
        let ds = make_dataset(&[50.0, 80.0, 200.0, 150.0]);
        let series = filter(&ds, &select_all());
        assert_approx(change(&series), -50.0, DEFAULT_EPSILON);
        assert_approx(percent_change(&series), -25.0, DEFAULT_EPSILON);
        assert_eq!(ChangeDirection::of(change(&series)), ChangeDirection::Down);
    }

    #[test]
    fn zero_previous_close_gives_zero_percent() {
        let ds = make_dataset(&[0.0, 5.0]);
        let series = filter(&ds, &select_all());
        assert_approx(change(&series), 5.0, DEFAULT_EPSILON);
        assert_eq!(percent_change(&series), 0.0);
    }

    #[test]
    fn nan_close_does_not_leak() {
        let ds = make_dataset(&[100.0, f64::NAN]);
        let series = filter(&ds, &select_all());
        assert_eq!(change(&series), 0.0);
        assert_eq!(percent_change(&series), 0.0);
    }

    #[test]
    fn flat_change_points_up() {
        assert_eq!(ChangeDirection::of(0.0), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(0.01), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(-0.01), ChangeDirection::Down);
    }
}
