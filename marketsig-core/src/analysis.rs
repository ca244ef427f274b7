//! One-shot analysis pipeline: validate, precompute, detect, scan, simulate.
//!
//! `run_analysis` is the crate's front door. It consumes an already-fetched
//! bar series plus a serializable [`AnalysisConfig`] and hands back a single
//! [`AnalysisReport`] for the reporting/rendering collaborator: per-bar rows
//! with indicator columns, the level set, the active source's events, the
//! reversal markers, and the simulation outcome.

use serde::{Deserialize, Serialize};

use crate::domain::{validate_series, Bar, BarError, LevelSet};
use crate::indicators::{Ema, Indicator, IndicatorValues, WilliamsR};
use crate::levels::{detect_levels, LevelMode};
use crate::signals::{
    reversal_markers, scan, LevelTouch, MaCrossover, OscillatorCross, ReversalMarker, SignalEvent,
    SignalSource,
};
use crate::sim::{simulate, CashPolicy, SimReport};

/// Level detection variant exposed at the config boundary.
///
/// The extrema scan takes its window from `window_size`; the factory in
/// [`run_analysis`] assembles the parameterized [`LevelMode`] from both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelModeChoice {
    #[default]
    Extrema,
    CloseRange,
}

/// Serializable configuration for a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lookback on each side of a bar in the extrema scan.
    pub window_size: usize,
    /// Band width around a level, in percent of the level price.
    pub touch_tolerance_pct: f64,
    /// Williams %R trailing window.
    pub oscillator_period: usize,
    pub ema_fast_span: usize,
    pub ema_slow_span: usize,
    /// Cash converted into shares on each Buy event.
    pub trade_stake: f64,
    pub active_signal_source: SignalSource,
    pub level_mode: LevelModeChoice,
    pub cash_policy: CashPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 14,
            touch_tolerance_pct: 2.0,
            oscillator_period: 14,
            ema_fast_span: 12,
            ema_slow_span: 26,
            trade_stake: 1000.0,
            active_signal_source: SignalSource::LevelTouch,
            level_mode: LevelModeChoice::default(),
            cash_policy: CashPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::WindowSize);
        }
        if self.oscillator_period == 0 {
            return Err(ConfigError::OscillatorPeriod);
        }
        if self.ema_fast_span == 0 || self.ema_slow_span <= self.ema_fast_span {
            return Err(ConfigError::EmaSpans {
                fast: self.ema_fast_span,
                slow: self.ema_slow_span,
            });
        }
        if !self.trade_stake.is_finite() || self.trade_stake <= 0.0 {
            return Err(ConfigError::TradeStake);
        }
        if !self.touch_tolerance_pct.is_finite() || self.touch_tolerance_pct < 0.0 {
            return Err(ConfigError::TouchTolerance);
        }
        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("window_size must be >= 1")]
    WindowSize,

    #[error("oscillator_period must be >= 1")]
    OscillatorPeriod,

    #[error("ema spans must satisfy 1 <= fast < slow (got fast={fast}, slow={slow})")]
    EmaSpans { fast: usize, slow: usize },

    #[error("trade_stake must be a finite positive amount")]
    TradeStake,

    #[error("touch_tolerance_pct must be a finite non-negative percentage")]
    TouchTolerance,
}

/// Anything that can abort a run before producing a report.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bar(#[from] BarError),
}

/// One bar of the annotated output series.
///
/// Indicator columns are `None` where the underlying value is undefined
/// (warmup or a flat %R window), which also keeps JSON output clean of NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    pub date: chrono::NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub willr: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
}

/// Everything one run hands to the reporting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub rows: Vec<BarRow>,
    pub levels: LevelSet,
    pub events: Vec<SignalEvent>,
    pub markers: Vec<ReversalMarker>,
    pub simulation: SimReport,
}

/// Run the full pipeline over a validated copy of the input series.
pub fn run_analysis(bars: &[Bar], config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    config.validate()?;
    validate_series(bars)?;

    let willr = WilliamsR::new(config.oscillator_period);
    let ema_fast = Ema::new(config.ema_fast_span);
    let ema_slow = Ema::new(config.ema_slow_span);

    let mut indicators = IndicatorValues::new();
    indicators.precompute(&willr, bars);
    indicators.precompute(&ema_fast, bars);
    indicators.precompute(&ema_slow, bars);

    let level_mode = match config.level_mode {
        LevelModeChoice::Extrema => LevelMode::Extrema {
            window: config.window_size,
        },
        LevelModeChoice::CloseRange => LevelMode::CloseRange,
    };
    let levels = detect_levels(bars, level_mode);

    let events = match config.active_signal_source {
        SignalSource::LevelTouch => {
            let touch = LevelTouch::new(
                levels.support_price(),
                levels.resistance_price(),
                config.touch_tolerance_pct,
            );
            scan(&touch, bars, &indicators)
        }
        SignalSource::OscillatorCross => {
            let cross = OscillatorCross::new(
                config.oscillator_period,
                levels.support_price(),
                levels.resistance_price(),
            );
            scan(&cross, bars, &indicators)
        }
        SignalSource::MaCross => {
            let crossover = MaCrossover::new(config.ema_fast_span, config.ema_slow_span);
            scan(&crossover, bars, &indicators)
        }
    };

    let markers = reversal_markers(bars);

    // Only level-based sources feed the stake replay; crossover runs are
    // charted without a capital simulation (the source behavior computes no
    // ROI for them).
    let simulation = match config.active_signal_source {
        SignalSource::LevelTouch | SignalSource::OscillatorCross => {
            simulate(&events, config.trade_stake, config.cash_policy)
        }
        SignalSource::MaCross => SimReport::default(),
    };

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| BarRow {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            willr: defined(&indicators, willr.name(), i),
            ema_fast: defined(&indicators, ema_fast.name(), i),
            ema_slow: defined(&indicators, ema_slow.name(), i),
        })
        .collect();

    Ok(AnalysisReport {
        rows,
        levels,
        events,
        markers,
        simulation,
    })
}

fn defined(indicators: &IndicatorValues, name: &str, bar_index: usize) -> Option<f64> {
    indicators
        .get(name, bar_index)
        .filter(|v| !v.is_nan())
}
