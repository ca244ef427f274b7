//! MarketSig Core — single-instrument daily-bar signal analysis.
//!
//! This crate contains the analytical pipeline:
//! - Domain types (bars, levels) with up-front series validation
//! - Precomputed indicators (Williams %R, EMA)
//! - Support/resistance level detection (extrema scan or close-range)
//! - Signal generators (level touch, oscillator cross, MA crossover)
//! - Candle-pattern reversal annotation
//! - Fixed-stake position simulation producing an ROI figure
//!
//! The pipeline is a pure function of an immutable bar series: validate once,
//! precompute indicator columns, detect levels, scan for signals, replay them
//! through the simulator. Nothing streams and nothing is shared between runs,
//! so independent instrument/parameter combinations can be analyzed in
//! parallel without synchronization.

pub mod analysis;
pub mod domain;
pub mod indicators;
pub mod levels;
pub mod signals;
pub mod sim;

pub use analysis::{
    run_analysis, AnalysisConfig, AnalysisError, AnalysisReport, BarRow, ConfigError,
    LevelModeChoice,
};
pub use domain::{Bar, BarError, Level, LevelSet};
pub use levels::LevelMode;
pub use signals::{ReversalKind, ReversalMarker, SignalDirection, SignalEvent, SignalSource};
pub use sim::{CashPolicy, SimReport};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: report and config types are Send + Sync.
    ///
    /// Callers batch analyses across threads (one run per instrument), so
    /// everything crossing the pipeline boundary must be thread-safe.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Level>();
        require_sync::<domain::LevelSet>();
        require_send::<signals::SignalEvent>();
        require_sync::<signals::SignalEvent>();
        require_send::<signals::ReversalMarker>();
        require_sync::<signals::ReversalMarker>();
        require_send::<sim::SimReport>();
        require_sync::<sim::SimReport>();
        require_send::<analysis::AnalysisConfig>();
        require_sync::<analysis::AnalysisConfig>();
        require_send::<analysis::AnalysisReport>();
        require_sync::<analysis::AnalysisReport>();
    }
}
