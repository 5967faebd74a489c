//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing `period` closes, counted in rows rather
//! than calendar days. First value at index period-1.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn window(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; closes.len()];

        // Each window is summed directly so no rounding drift accumulates.
        for (i, window) in closes.windows(self.period).enumerate() {
            if window.iter().all(|c| c.is_finite()) {
                let sum: f64 = window.iter().sum();
                result[i + self.period - 1] = Some(sum / self.period as f64);
            }
        }

        result
    }
}
