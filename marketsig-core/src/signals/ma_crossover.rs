//! EMA crossover signal — golden cross and death cross detection.
//!
//! Maintains the binary state "fast EMA strictly above slow EMA". Buy on a
//! transition into that state, Sell on a transition out of it — equivalent
//! to a sign change of `fast - slow` between consecutive bars.

use crate::domain::Bar;
use crate::indicators::IndicatorValues;

use super::{SignalDirection, SignalEvent, SignalGenerator, SignalSource};

/// EMA crossover signal generator.
///
/// Requires two precomputed EMA series: `ema_{fast_span}` and
/// `ema_{slow_span}`.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub fast_span: usize,
    pub slow_span: usize,
    fast_key: String,
    slow_key: String,
}

impl MaCrossover {
    pub fn new(fast_span: usize, slow_span: usize) -> Self {
        assert!(fast_span >= 1, "fast_span must be >= 1");
        assert!(slow_span > fast_span, "slow_span must be > fast_span");
        Self {
            fast_span,
            slow_span,
            fast_key: format!("ema_{fast_span}"),
            slow_key: format!("ema_{slow_span}"),
        }
    }
}

impl SignalGenerator for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn warmup_bars(&self) -> usize {
        // EMAs seed from the first close, so only the previous bar is needed.
        1
    }

    fn evaluate(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> Option<SignalEvent> {
        if bar_index < self.warmup_bars() {
            return None;
        }

        let fast_curr = indicators.get(&self.fast_key, bar_index)?;
        let slow_curr = indicators.get(&self.slow_key, bar_index)?;
        let fast_prev = indicators.get(&self.fast_key, bar_index - 1)?;
        let slow_prev = indicators.get(&self.slow_key, bar_index - 1)?;

        if fast_curr.is_nan() || slow_curr.is_nan() || fast_prev.is_nan() || slow_prev.is_nan() {
            return None;
        }

        let above_prev = fast_prev > slow_prev;
        let above_curr = fast_curr > slow_curr;

        let direction = match (above_prev, above_curr) {
            (false, true) => SignalDirection::Buy,
            (true, false) => SignalDirection::Sell,
            _ => return None,
        };

        let bar = &bars[bar_index];
        Some(SignalEvent {
            bar_index,
            date: bar.date,
            price: bar.close,
            direction,
            source: SignalSource::MaCross,
        })
    }
}
