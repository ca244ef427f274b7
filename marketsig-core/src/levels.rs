//! Support/resistance level detection.
//!
//! Two modes:
//! - `Extrema`: windowed scan for local minima of lows / maxima of highs,
//!   reporting both the absolute extremes and the most frequently touched
//!   price of each candidate multiset.
//! - `CloseRange`: series-wide minimum and maximum close, the simpler
//!   variant used when no windowed scan is wanted.
//!
//! Pure and idempotent: the same series and mode always yield the same
//! `LevelSet`. A series too short for the scan yields an empty set, never
//! an error — missing levels mean "no level-based signal possible".

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, Level, LevelSet};

/// Candidate prices closer than this are treated as touches of one level.
/// The scan compares raw float values, so this only needs to absorb
/// representation noise, not market noise.
const PRICE_EPS: f64 = 1e-9;

/// Level detection mode (serializable config enum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelMode {
    /// Local-extrema scan: bar i is a support candidate when its low is the
    /// minimum over the inclusive window [i-window, i+window]; symmetric
    /// for resistance on highs.
    Extrema { window: usize },

    /// Series-wide min/max close as the single support/resistance pair.
    CloseRange,
}

impl Default for LevelMode {
    fn default() -> Self {
        LevelMode::Extrema { window: 14 }
    }
}

/// Detect support and resistance levels for the whole series.
pub fn detect_levels(bars: &[Bar], mode: LevelMode) -> LevelSet {
    match mode {
        LevelMode::Extrema { window } => extrema_levels(bars, window),
        LevelMode::CloseRange => close_range_levels(bars),
    }
}

fn extrema_levels(bars: &[Bar], window: usize) -> LevelSet {
    // Need at least one interior bar with a full window on both sides.
    if window == 0 || bars.len() < 2 * window + 1 {
        return LevelSet::default();
    }

    let mut supports = Vec::new();
    let mut resistances = Vec::new();

    for i in window..bars.len() - window {
        let neighborhood = &bars[i - window..=i + window];

        let low_min = neighborhood.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        if bars[i].low == low_min {
            supports.push(bars[i].low);
        }

        let high_max = neighborhood
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);
        if bars[i].high == high_max {
            resistances.push(bars[i].high);
        }
    }

    let support_clusters = cluster(supports);
    let resistance_clusters = cluster(resistances);

    LevelSet {
        lowest_support: support_clusters
            .first()
            .map(|c| Level { price: c.min, touches: c.count }),
        // Frequency ties break to the lowest price (strict > keeps the
        // first, lowest cluster).
        most_support: support_clusters
            .iter()
            .reduce(|best, c| if c.count > best.count { c } else { best })
            .map(|c| Level { price: c.min, touches: c.count }),
        highest_resistance: resistance_clusters
            .last()
            .map(|c| Level { price: c.max, touches: c.count }),
        // Ties break to the highest price (>= keeps the last, highest cluster).
        most_resistance: resistance_clusters
            .iter()
            .reduce(|best, c| if c.count >= best.count { c } else { best })
            .map(|c| Level { price: c.max, touches: c.count }),
    }
}

fn close_range_levels(bars: &[Bar]) -> LevelSet {
    if bars.is_empty() {
        return LevelSet::default();
    }

    let min_close = bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
    let max_close = bars
        .iter()
        .map(|b| b.close)
        .fold(f64::NEG_INFINITY, f64::max);

    let support = Level {
        price: min_close,
        touches: bars
            .iter()
            .filter(|b| (b.close - min_close).abs() <= PRICE_EPS)
            .count(),
    };
    let resistance = Level {
        price: max_close,
        touches: bars
            .iter()
            .filter(|b| (b.close - max_close).abs() <= PRICE_EPS)
            .count(),
    };

    // Extreme and most-touched coincide in this mode.
    LevelSet {
        lowest_support: Some(support),
        most_support: Some(support),
        highest_resistance: Some(resistance),
        most_resistance: Some(resistance),
    }
}

/// One group of candidate prices within `PRICE_EPS` of each other.
#[derive(Debug, Clone, Copy)]
struct Cluster {
    min: f64,
    max: f64,
    count: usize,
}

/// Sort candidates and merge neighbors within `PRICE_EPS` into clusters,
/// returned in ascending price order.
fn cluster(mut values: Vec<f64>) -> Vec<Cluster> {
    values.sort_by(f64::total_cmp);

    let mut clusters: Vec<Cluster> = Vec::new();
    for v in values {
        match clusters.last_mut() {
            Some(c) if v - c.max <= PRICE_EPS => {
                c.max = v;
                c.count += 1;
            }
            _ => clusters.push(Cluster { min: v, max: v, count: 1 }),
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Bars with the given (high, low) pairs; open/close sit mid-range.
    fn bars_from_ranges(ranges: &[(f64, f64)]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| {
                let mid = (high + low) / 2.0;
                Bar {
                    date: base_date + chrono::Duration::days(i as i64),
                    open: mid,
                    high,
                    low,
                    close: mid,
                }
            })
            .collect()
    }

    #[test]
    fn extrema_scan_finds_repeated_floor_and_ceiling() {
        // Lows dip to 3.0 at indices 1, 3, 5; highs peak at 11.0 (i=2) and
        // 12.0 (i=4). Window 1.
        let bars = bars_from_ranges(&[
            (10.0, 5.0),
            (9.0, 3.0),
            (11.0, 6.0),
            (9.0, 3.0),
            (12.0, 7.0),
            (9.0, 3.0),
            (13.0, 8.0),
        ]);
        let set = detect_levels(&bars, LevelMode::Extrema { window: 1 });

        assert_eq!(set.most_support, Some(Level { price: 3.0, touches: 3 }));
        assert_eq!(set.lowest_support, Some(Level { price: 3.0, touches: 3 }));
        // i=6 has no right neighbor, so 13.0 is not a candidate.
        assert_eq!(set.highest_resistance, Some(Level { price: 12.0, touches: 1 }));
        // Frequency tie between 11.0 and 12.0 (one touch each) → highest.
        assert_eq!(set.most_resistance, Some(Level { price: 12.0, touches: 1 }));
    }

    #[test]
    fn frequency_tie_breaks_to_lowest_support() {
        // Supports 3.0 (i=1, i=3) and 4.0 (i=5, i=7): two touches each.
        let bars = bars_from_ranges(&[
            (10.0, 6.0),
            (9.0, 3.0),
            (10.0, 6.0),
            (9.0, 3.0),
            (10.0, 6.0),
            (9.0, 4.0),
            (10.0, 6.0),
            (9.0, 4.0),
            (10.0, 6.0),
        ]);
        let set = detect_levels(&bars, LevelMode::Extrema { window: 1 });
        assert_eq!(set.most_support, Some(Level { price: 3.0, touches: 2 }));
        assert_eq!(set.lowest_support, Some(Level { price: 3.0, touches: 2 }));
    }

    #[test]
    fn short_series_yields_empty_set() {
        let bars = bars_from_ranges(&[(10.0, 5.0), (11.0, 6.0)]);
        let set = detect_levels(&bars, LevelMode::Extrema { window: 14 });
        assert_eq!(set, LevelSet::default());
    }

    #[test]
    fn detection_is_idempotent() {
        let bars = bars_from_ranges(&[
            (10.0, 5.0),
            (9.0, 3.0),
            (11.0, 6.0),
            (9.0, 3.0),
            (12.0, 7.0),
        ]);
        let first = detect_levels(&bars, LevelMode::Extrema { window: 1 });
        let second = detect_levels(&bars, LevelMode::Extrema { window: 1 });
        assert_eq!(first, second);
    }

    #[test]
    fn close_range_uses_series_extremes() {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let closes = [10.0, 12.0, 9.0, 15.0, 9.0];
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
            })
            .collect();

        let set = detect_levels(&bars, LevelMode::CloseRange);
        assert_eq!(set.most_support, Some(Level { price: 9.0, touches: 2 }));
        assert_eq!(set.most_resistance, Some(Level { price: 15.0, touches: 1 }));
        assert_eq!(set.lowest_support, set.most_support);
        assert_eq!(set.highest_resistance, set.most_resistance);
    }

    #[test]
    fn close_range_empty_series() {
        assert_eq!(detect_levels(&[], LevelMode::CloseRange), LevelSet::default());
    }
}
