//! Selection: the viewer's instrument and date-range choice.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;

/// Trailing window shown when a view first opens.
pub const DEFAULT_WINDOW_WEEKS: u32 = 12;

/// First day of a `weeks`-long window ending at `end`.
///
/// Clamps to [`NaiveDate::MIN`] when the window reaches past the calendar.
pub fn window_start(end: NaiveDate, weeks: u32) -> NaiveDate {
    Duration::try_weeks(i64::from(weeks))
        .and_then(|span| end.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN)
}

/// Instrument plus closed date interval `[start, end]`.
///
/// `start <= end` is not enforced: an inverted range simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub instrument: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Selection {
    pub fn new(instrument: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            instrument: instrument.into(),
            start,
            end,
        }
    }

    /// First instrument and the default trailing window ending at the latest date.
    pub fn default_for(dataset: &Dataset) -> Option<Self> {
        Self::default_for_window(dataset, DEFAULT_WINDOW_WEEKS)
    }

    /// First instrument and a `weeks`-long window ending at the latest date.
    ///
    /// Returns `None` for an empty dataset.
    pub fn default_for_window(dataset: &Dataset, weeks: u32) -> Option<Self> {
        let (_, end) = dataset.date_bounds()?;
        let instrument = dataset.instruments().first()?.to_string();
        Some(Self::new(instrument, window_start(end, weeks), end))
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
