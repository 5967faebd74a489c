//! Per-viewer recomputation scope.
//!
//! An [`ExplorerView`] owns one viewer's [`Selection`] and the [`Dashboard`]
//! derived from it. Every selection change re-runs the whole pipeline
//! synchronously; the last selection wins. Views share the dataset through
//! an `Arc` and nothing else, so any number of them can live side by side.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Dataset, Selection};
use crate::pipeline::{
    build_chart_series, change, filter, format_number, latest_close, latest_snapshot,
    percent_change, ChangeDirection, ChartSeries, SnapshotEntry,
};

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub selection: Selection,
    pub rows: usize,
    pub latest_price: Option<f64>,
    pub change: f64,
    pub percent_change: f64,
    pub direction: ChangeDirection,
    pub chart: ChartSeries,
    pub snapshot: Vec<SnapshotEntry>,
}

impl Dashboard {
    /// Run filter → {metrics, series, snapshot} for `selection`.
    pub fn evaluate(dataset: &Dataset, selection: &Selection) -> Self {
        let series = filter(dataset, selection);
        let change = change(&series);

        let dashboard = Self {
            selection: selection.clone(),
            rows: series.len(),
            latest_price: latest_close(&series),
            change,
            percent_change: percent_change(&series),
            direction: ChangeDirection::of(change),
            chart: build_chart_series(&series),
            snapshot: latest_snapshot(&series),
        };
        debug!(
            instrument = %selection.instrument,
            rows = dashboard.rows,
            change = dashboard.change,
            "dashboard evaluated"
        );
        dashboard
    }

    /// Current price box: two decimals, `N/A` when nothing is selected.
    pub fn price_display(&self) -> String {
        self.latest_price
            .map(format_number)
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Change box, e.g. `$5.00` or `$-1.25`.
    pub fn change_display(&self) -> String {
        format!("${}", format_number(self.change))
    }

    /// Percent change box, e.g. `5.00%`.
    pub fn percent_display(&self) -> String {
        format!("{}%", format_number(self.percent_change))
    }
}

/// One viewer's selection and its derived dashboard.
#[derive(Debug, Clone)]
pub struct ExplorerView {
    dataset: Arc<Dataset>,
    selection: Selection,
    dashboard: Dashboard,
}

impl ExplorerView {
    pub fn new(dataset: Arc<Dataset>, selection: Selection) -> Self {
        let dashboard = Dashboard::evaluate(&dataset, &selection);
        Self {
            dataset,
            selection,
            dashboard,
        }
    }

    /// Open with the default selection; `None` if the dataset is empty.
    pub fn open(dataset: Arc<Dataset>, window_weeks: u32) -> Option<Self> {
        let selection = Selection::default_for_window(&dataset, window_weeks)?;
        Some(Self::new(dataset, selection))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn select(&mut self, selection: Selection) -> &Dashboard {
        self.selection = selection;
        self.dashboard = Dashboard::evaluate(&self.dataset, &self.selection);
        &self.dashboard
    }

    pub fn select_instrument(&mut self, instrument: impl Into<String>) -> &Dashboard {
        let selection = self.selection.clone().with_instrument(instrument);
        self.select(selection)
    }

    pub fn select_range(
        &mut self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> &Dashboard {
        let selection = self.selection.clone().with_range(start, end);
        self.select(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Observation, RowLayout};
    use chrono::{Duration, NaiveDate};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn shared_dataset() -> Arc<Dataset> {
        let mut rows = Vec::new();
        for i in 0..10u32 {
            let date = d(2) + Duration::days(i64::from(i));
            rows.push(Observation::new(date, 100.0 + f64::from(i)).with_instrument("AAA"));
            rows.push(Observation::new(date, 50.0 - f64::from(i)).with_instrument("BBB"));
        }
        Arc::new(Dataset::new(RowLayout::standard(true), rows).unwrap())
    }

    #[test]
    fn open_uses_first_instrument_and_recent_window() {
        let view = ExplorerView::open(shared_dataset(), 12).unwrap();
        let dash = view.dashboard();
        assert_eq!(view.selection().instrument, "AAA");
        assert_eq!(dash.rows, 10);
        assert_eq!(dash.latest_price, Some(109.0));
        assert_eq!(dash.change, 1.0);
        assert_eq!(dash.direction, ChangeDirection::Up);
        assert!(dash.chart.has_overlay());
        assert_eq!(dash.price_display(), "109.00");
        assert_eq!(dash.change_display(), "$1.00");
    }

    #[test]
    fn switching_instrument_recomputes() {
        let mut view = ExplorerView::open(shared_dataset(), 12).unwrap();
        let dash = view.select_instrument("BBB");
        assert_eq!(dash.latest_price, Some(41.0));
        assert_eq!(dash.change, -1.0);
        assert_eq!(dash.direction, ChangeDirection::Down);
        assert_eq!(view.selection().instrument, "BBB");
    }

    #[test]
    fn narrowing_range_drops_overlay() {
        let mut view = ExplorerView::open(shared_dataset(), 12).unwrap();
        let dash = view.select_range(d(5), d(8));
        assert_eq!(dash.rows, 4);
        assert!(!dash.chart.has_overlay());
        assert_eq!(dash.chart.overlay.len(), 4);
    }

    #[test]
    fn empty_selection_is_stable() {
        let mut view = ExplorerView::open(shared_dataset(), 12).unwrap();
        let dash = view.select_range(d(20), d(1));
        assert_eq!(dash.rows, 0);
        assert_eq!(dash.price_display(), "N/A");
        assert_eq!(dash.change_display(), "$0.00");
        assert_eq!(dash.percent_display(), "0.00%");
        assert!(dash.chart.is_empty());
        assert!(dash.snapshot.is_empty());
    }

    #[test]
    fn views_over_one_dataset_are_independent() {
        let dataset = shared_dataset();
        let mut a = ExplorerView::open(Arc::clone(&dataset), 12).unwrap();
        let b = ExplorerView::open(Arc::clone(&dataset), 12).unwrap();

        a.select_instrument("BBB");
        assert_eq!(a.selection().instrument, "BBB");
        assert_eq!(b.selection().instrument, "AAA");
        assert_eq!(b.dashboard().latest_price, Some(109.0));
    }

    #[test]
    fn open_with_unbounded_window_covers_every_row() {
        let view = ExplorerView::open(shared_dataset(), u32::MAX).unwrap();
        assert_eq!(view.selection().start, NaiveDate::MIN);
        assert_eq!(view.dashboard().rows, 10);
    }

    #[test]
    fn open_on_empty_dataset_is_none() {
        let empty = Arc::new(Dataset::new(RowLayout::standard(true), Vec::new()).unwrap());
        assert!(ExplorerView::open(empty, 12).is_none());
    }

    #[test]
    fn dashboard_serializes_to_json() {
        let view = ExplorerView::open(shared_dataset(), 12).unwrap();
        let json = serde_json::to_value(view.dashboard()).unwrap();
        assert_eq!(json["rows"], 10);
        assert_eq!(json["direction"], "Up");
        assert_eq!(json["chart"]["overlay"].as_array().unwrap().len(), 10);
    }
}
