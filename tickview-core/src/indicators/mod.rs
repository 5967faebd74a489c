//! Trailing indicators drawn over the price chart.
//!
//! Indicators are pure functions: close history in, aligned series out.
//! No value at index t may depend on closes after t.

pub mod sma;

pub use sma::Sma;

/// Trait for chart overlay indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_7").
    fn name(&self) -> &str;

    /// Number of trailing rows each output value is computed from.
    fn window(&self) -> usize;

    /// Number of leading rows with no value.
    fn lookback(&self) -> usize {
        self.window().saturating_sub(1)
    }

    /// Compute over the whole close series.
    ///
    /// Returns a `Vec` of the same length as `closes`; the first `lookback()`
    /// entries are `None`.
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
