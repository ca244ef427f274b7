//! Indicator trait, precomputed values container, and concrete indicators.
//!
//! Indicators are pure functions: bar history in, numeric series out. They
//! are precomputed once before the signal pass and queried per-bar via
//! `IndicatorValues`. No recomputation on each bar.
//!
//! Output series align one-to-one with the input bars; warmup and undefined
//! points are `f64::NAN`. Consumers must guard with `is_nan()` — NaN never
//! reaches an emitted signal event.

pub mod ema;
pub mod williams_r;

pub use ema::Ema;
pub use williams_r::WilliamsR;

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// `compute` returns a `Vec<f64>` of the same length as `bars`, with the
/// first `lookback()` values `f64::NAN`. No value at bar t may depend on
/// price data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Series name the values are stored under (e.g., "willr_14", "ema_12").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Container for precomputed indicator series, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and store an indicator's series under its name.
    pub fn precompute(&mut self, indicator: &dyn Indicator, bars: &[Bar]) {
        self.series
            .insert(indicator.name().to_string(), indicator.compute(bars));
    }

    /// Insert a named series directly (used by tests to inject fixtures).
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value at a specific bar index; `None` when the series or index is missing.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHL: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
            }
        })
        .collect()
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

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
