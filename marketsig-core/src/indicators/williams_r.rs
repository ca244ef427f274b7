//! Williams %R — close position within the trailing high-low range.
//!
//! %R[t] = (HH - close[t]) / (HH - LL) * -100
//! where HH / LL are the highest high and lowest low over the trailing
//! `period` bars inclusive of t. Bounded in [-100, 0] when defined.
//! Lookback: period - 1. A flat window (HH == LL) yields NaN for that
//! point only — division by zero never propagates.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
    name: String,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self {
            period,
            name: format!("willr_{period}"),
        }
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];

            let mut highest = f64::NEG_INFINITY;
            let mut lowest = f64::INFINITY;
            for bar in window {
                if bar.high > highest {
                    highest = bar.high;
                }
                if bar.low < lowest {
                    lowest = bar.low;
                }
            }

            let range = highest - lowest;
            if range > 0.0 {
                result[i] = (highest - bars[i].close) / range * -100.0;
            }
        }

        result
    }
}
