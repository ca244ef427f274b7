//! Signal generation — detects market events, emits directional intent.
//!
//! Signal generators are level-aware but portfolio-agnostic: they receive
//! bar history, precomputed indicator values, and (at construction time)
//! the detected levels — never simulation state. Events are immutable once
//! emitted and carry the bar's close as their reference price.
//!
//! Candle-pattern reversal markers are annotations, not trade events, and
//! live in [`patterns`] as a separate category.

pub mod level_touch;
pub mod ma_crossover;
pub mod oscillator_cross;
pub mod patterns;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::IndicatorValues;

/// Directional intent of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Buy,
    Sell,
}

/// Which generator produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalSource {
    LevelTouch,
    OscillatorCross,
    MaCross,
}

/// An immutable market event emitted by a signal generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub bar_index: usize,
    pub date: NaiveDate,
    /// Reference price (the bar's close).
    pub price: f64,
    pub direction: SignalDirection,
    pub source: SignalSource,
}

/// Trait for signal generators.
///
/// `evaluate` must only use data from `bars[0..=bar_index]` and the
/// matching indicator prefix — no value may depend on later bars.
pub trait SignalGenerator: Send + Sync {
    /// Human-readable name (e.g., "level_touch").
    fn name(&self) -> &str;

    /// Number of bars needed before this generator can produce output.
    fn warmup_bars(&self) -> usize;

    /// Evaluate the generator at `bar_index`.
    ///
    /// Returns `Some(SignalEvent)` if a signal fires, `None` otherwise.
    fn evaluate(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> Option<SignalEvent>;
}

/// Run a generator over the full series in bar order, collecting every event.
pub fn scan(
    generator: &dyn SignalGenerator,
    bars: &[Bar],
    indicators: &IndicatorValues,
) -> Vec<SignalEvent> {
    (0..bars.len())
        .filter_map(|i| generator.evaluate(bars, i, indicators))
        .collect()
}

// Re-export concrete generator and annotation types.
pub use level_touch::LevelTouch;
pub use ma_crossover::MaCrossover;
pub use oscillator_cross::OscillatorCross;
pub use patterns::{reversal_markers, ReversalKind, ReversalMarker};
