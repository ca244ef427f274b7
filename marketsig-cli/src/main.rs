//! MarketSig CLI — analyze a CSV of daily bars and report signals and ROI.
//!
//! Bars arrive as a CSV with a `date,open,high,low,close` header (extra
//! columns are ignored). Configuration comes from an optional TOML file,
//! with individual flags overriding it. Output is a text summary or, with
//! `--json`, the full analysis report.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use marketsig_core::{
    run_analysis, AnalysisConfig, AnalysisReport, Bar, CashPolicy, LevelModeChoice,
    SignalDirection, SignalSource,
};

#[derive(Parser)]
#[command(
    name = "marketsig",
    about = "MarketSig CLI — support/resistance and momentum signal analysis"
)]
struct Cli {
    /// CSV file of daily bars (date,open,high,low,close with header).
    bars: PathBuf,

    /// TOML config file; flags below override individual values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Signal source to trade on.
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Extrema scan lookback on each side of a bar.
    #[arg(long)]
    window: Option<usize>,

    /// Touch band width around a level, in percent.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Williams %R trailing window.
    #[arg(long)]
    period: Option<usize>,

    /// Fast EMA span.
    #[arg(long)]
    fast: Option<usize>,

    /// Slow EMA span.
    #[arg(long)]
    slow: Option<usize>,

    /// Cash stake per buy signal.
    #[arg(long)]
    stake: Option<f64>,

    /// Use the series-wide close range instead of the extrema scan.
    #[arg(long, default_value_t = false)]
    close_range: bool,

    /// Reproduce the legacy accounting that never resets deployed capital.
    #[arg(long, default_value_t = false)]
    legacy_cash: bool,

    /// Emit the full report as JSON instead of a text summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    LevelTouch,
    OscillatorCross,
    MaCross,
}

impl From<SourceArg> for SignalSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::LevelTouch => SignalSource::LevelTouch,
            SourceArg::OscillatorCross => SignalSource::OscillatorCross,
            SourceArg::MaCross => SignalSource::MaCross,
        }
    }
}

/// One CSV record; columns beyond OHLC (volume, adj close) are ignored.
#[derive(Debug, Deserialize)]
struct CsvBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open bar file {}", path.display()))?;

    let mut bars = Vec::new();
    for record in reader.deserialize() {
        let row: CsvBar = record.context("malformed CSV row")?;
        bars.push(Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
        });
    }
    Ok(bars)
}

fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read config file {}", path.display()))?;
            toml::from_str(&text).context("invalid TOML config")?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(source) = cli.source {
        config.active_signal_source = source.into();
    }
    if let Some(window) = cli.window {
        config.window_size = window;
    }
    if let Some(tolerance) = cli.tolerance {
        config.touch_tolerance_pct = tolerance;
    }
    if let Some(period) = cli.period {
        config.oscillator_period = period;
    }
    if let Some(fast) = cli.fast {
        config.ema_fast_span = fast;
    }
    if let Some(slow) = cli.slow {
        config.ema_slow_span = slow;
    }
    if let Some(stake) = cli.stake {
        config.trade_stake = stake;
    }
    if cli.close_range {
        config.level_mode = LevelModeChoice::CloseRange;
    }
    if cli.legacy_cash {
        config.cash_policy = CashPolicy::Accumulate;
    }

    Ok(config)
}

fn print_summary(report: &AnalysisReport) {
    println!("Bars analyzed: {}", report.rows.len());

    println!("\nLevels:");
    match (&report.levels.most_support, &report.levels.lowest_support) {
        (Some(most), Some(lowest)) => {
            println!("  support    {:>10.2} ({} touches, lowest {:.2})", most.price, most.touches, lowest.price);
        }
        _ => println!("  support    undefined"),
    }
    match (&report.levels.most_resistance, &report.levels.highest_resistance) {
        (Some(most), Some(highest)) => {
            println!("  resistance {:>10.2} ({} touches, highest {:.2})", most.price, most.touches, highest.price);
        }
        _ => println!("  resistance undefined"),
    }

    println!("\nSignals ({}):", report.events.len());
    for event in &report.events {
        let tag = match event.direction {
            SignalDirection::Buy => "BUY ",
            SignalDirection::Sell => "SELL",
        };
        println!("  {} {} @ {:.2}", event.date, tag, event.price);
    }

    println!("\nReversal markers ({}):", report.markers.len());
    for marker in &report.markers {
        println!("  {} {:?}", marker.date, marker.kind);
    }

    let sim = &report.simulation;
    println!("\nSimulation:");
    println!("  cash deployed   {:>12.2}", sim.cash_deployed);
    println!("  realized profit {:>12.2}", sim.realized_profit);
    println!("  ROI             {:>11.2}%", sim.roi_pct);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let bars = load_bars(&cli.bars)?;
    let config = build_config(&cli)?;

    let report = run_analysis(&bars, &config).context("analysis failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_win_over_config_defaults() {
        let cli = Cli::parse_from([
            "marketsig",
            "bars.csv",
            "--source",
            "ma-cross",
            "--fast",
            "5",
            "--slow",
            "20",
            "--legacy-cash",
        ]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.active_signal_source, SignalSource::MaCross);
        assert_eq!(config.ema_fast_span, 5);
        assert_eq!(config.ema_slow_span, 20);
        assert_eq!(config.cash_policy, CashPolicy::Accumulate);
        // Untouched values keep their defaults.
        assert_eq!(config.window_size, 14);
        assert_eq!(config.trade_stake, 1000.0);
    }

    #[test]
    fn close_range_flag_switches_level_mode() {
        let cli = Cli::parse_from(["marketsig", "bars.csv", "--close-range"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.level_mode, LevelModeChoice::CloseRange);
    }
}
