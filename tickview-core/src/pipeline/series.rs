//! Series stage: candlestick points plus the trailing moving-average overlay.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::filter::FilteredSeries;
use crate::indicators::{Indicator, Sma};

/// Trailing window of the default overlay, in rows.
pub const OVERLAY_WINDOW: usize = 7;

/// One candlestick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
}

/// Chart-ready series. `overlay[i]` belongs to `ohlc[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub ohlc: Vec<OhlcPoint>,
    pub overlay: Vec<Option<f64>>,
    pub overlay_name: String,
}

impl ChartSeries {
    /// Whether any overlay value exists (i.e. the overlay should be drawn).
    pub fn has_overlay(&self) -> bool {
        self.overlay.iter().any(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.ohlc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ohlc.is_empty()
    }
}

/// Candlesticks with the 7-row simple moving average of close.
pub fn build_chart_series(series: &FilteredSeries<'_>) -> ChartSeries {
    build_chart_series_with(series, &Sma::new(OVERLAY_WINDOW))
}

/// Candlesticks with an arbitrary trailing indicator.
///
/// A series shorter than the indicator's window gets no overlay at all;
/// the window is never shrunk to fit.
pub fn build_chart_series_with(
    series: &FilteredSeries<'_>,
    indicator: &dyn Indicator,
) -> ChartSeries {
    let ohlc: Vec<OhlcPoint> = series
        .iter()
        .map(|obs| OhlcPoint {
            date: obs.date,
            open: obs.open,
            high: obs.high,
            low: obs.low,
            close: obs.close,
        })
        .collect();

    let overlay = if ohlc.len() >= indicator.window() {
        let closes: Vec<f64> = ohlc.iter().map(|p| p.close).collect();
        indicator.compute(&closes)
    } else {
        debug!(
            rows = ohlc.len(),
            window = indicator.window(),
            "not enough history for overlay"
        );
        vec![None; ohlc.len()]
    };

    ChartSeries {
        ohlc,
        overlay,
        overlay_name: indicator.name().to_string(),
    }
}
