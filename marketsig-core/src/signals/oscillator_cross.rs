//! Oscillator-cross signal — Williams %R threshold crossings gated by levels.
//!
//! Buy when %R crosses up through -80 (prev < -80, curr >= -80) and the
//! bar's low reaches the most-touched support. Sell when %R crosses down
//! through -20 (prev > -20, curr <= -20) and the bar's high reaches the
//! most-touched resistance. Both the prior and current %R must be defined.

use crate::domain::Bar;
use crate::indicators::IndicatorValues;

use super::{SignalDirection, SignalEvent, SignalGenerator, SignalSource};

const OVERSOLD: f64 = -80.0;
const OVERBOUGHT: f64 = -20.0;

/// Williams %R crossing generator.
///
/// Reads the `willr_{period}` series from `IndicatorValues`; levels are
/// fixed at construction time. An undefined level disables that side.
#[derive(Debug, Clone)]
pub struct OscillatorCross {
    period: usize,
    support: Option<f64>,
    resistance: Option<f64>,
    willr_key: String,
}

impl OscillatorCross {
    pub fn new(period: usize, support: Option<f64>, resistance: Option<f64>) -> Self {
        assert!(period >= 1, "oscillator period must be >= 1");
        Self {
            period,
            support,
            resistance,
            willr_key: format!("willr_{period}"),
        }
    }
}

impl SignalGenerator for OscillatorCross {
    fn name(&self) -> &str {
        "oscillator_cross"
    }

    fn warmup_bars(&self) -> usize {
        // First defined %R sits at period - 1; a crossing needs one more bar.
        self.period
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

        let bar = &bars[bar_index];
        let curr = indicators.get(&self.willr_key, bar_index)?;
        let prev = indicators.get(&self.willr_key, bar_index - 1)?;

        // A flat trailing window leaves %R undefined; no crossing then.
        if curr.is_nan() || prev.is_nan() {
            return None;
        }

        if prev < OVERSOLD && curr >= OVERSOLD {
            if let Some(support) = self.support {
                if bar.low <= support {
                    return Some(SignalEvent {
                        bar_index,
                        date: bar.date,
                        price: bar.close,
                        direction: SignalDirection::Buy,
                        source: SignalSource::OscillatorCross,
                    });
                }
            }
        }

        if prev > OVERBOUGHT && curr <= OVERBOUGHT {
            if let Some(resistance) = self.resistance {
                if bar.high >= resistance {
                    return Some(SignalEvent {
                        bar_index,
                        date: bar.date,
                        price: bar.close,
                        direction: SignalDirection::Sell,
                        source: SignalSource::OscillatorCross,
                    });
                }
            }
        }

        None
    }
}
