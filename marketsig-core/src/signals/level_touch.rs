//! Level-touch signal — close inside a tolerance band around a level.
//!
//! Buy when the close falls within `support * (1 ± pct/100)`, Sell within
//! the same band around resistance. Deliberately unbounced: consecutive
//! in-band bars each emit an event. When both bands cover the same close
//! (support and resistance nearly coincide), the buy side wins.

use crate::domain::Bar;
use crate::indicators::IndicatorValues;

use super::{SignalDirection, SignalEvent, SignalGenerator, SignalSource};

/// Level-touch signal generator.
///
/// Levels are fixed at construction time from the detected `LevelSet`;
/// an undefined level disables that side entirely.
#[derive(Debug, Clone)]
pub struct LevelTouch {
    support: Option<f64>,
    resistance: Option<f64>,
    tolerance_pct: f64,
}

impl LevelTouch {
    pub fn new(support: Option<f64>, resistance: Option<f64>, tolerance_pct: f64) -> Self {
        assert!(tolerance_pct >= 0.0, "tolerance_pct must be >= 0");
        Self {
            support,
            resistance,
            tolerance_pct,
        }
    }

    fn in_band(&self, level: f64, close: f64) -> bool {
        let width = level * self.tolerance_pct / 100.0;
        close >= level - width && close <= level + width
    }
}

impl SignalGenerator for LevelTouch {
    fn name(&self) -> &str {
        "level_touch"
    }

    fn warmup_bars(&self) -> usize {
        0
    }

    fn evaluate(
        &self,
        bars: &[Bar],
        bar_index: usize,
        _indicators: &IndicatorValues,
    ) -> Option<SignalEvent> {
        let bar = &bars[bar_index];

        let direction = if self
            .support
            .is_some_and(|level| self.in_band(level, bar.close))
        {
            SignalDirection::Buy
        } else if self
            .resistance
            .is_some_and(|level| self.in_band(level, bar.close))
        {
            SignalDirection::Sell
        } else {
            return None;
        };

        Some(SignalEvent {
            bar_index,
            date: bar.date,
            price: bar.close,
            direction,
            source: SignalSource::LevelTouch,
        })
    }
}
