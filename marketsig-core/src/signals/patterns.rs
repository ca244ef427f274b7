//! Candle-pattern annotation — engulfing-style reversal markers.
//!
//! A bullish reversal marks a bullish bar that opens below the prior
//! bearish bar's close and closes above its open (the body engulfs the
//! prior body from below); the bearish reversal is the mirror. Markers are
//! annotations for the reporting layer, never Buy/Sell trade events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversalKind {
    Bullish,
    Bearish,
}

/// A reversal annotation at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalMarker {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub kind: ReversalKind,
}

/// Classify every bar (from the second onwards) against its predecessor.
pub fn reversal_markers(bars: &[Bar]) -> Vec<ReversalMarker> {
    let mut markers = Vec::new();

    for i in 1..bars.len() {
        let prev = &bars[i - 1];
        let curr = &bars[i];

        let bullish_reversal = curr.is_bullish()
            && prev.is_bearish()
            && curr.open < prev.close
            && curr.close > prev.open;

        let bearish_reversal = curr.is_bearish()
            && prev.is_bullish()
            && curr.open > prev.close
            && curr.close < prev.open;

        if bullish_reversal {
            markers.push(ReversalMarker {
                bar_index: i,
                date: curr.date,
                kind: ReversalKind::Bullish,
            });
        } else if bearish_reversal {
            markers.push(ReversalMarker {
                bar_index: i,
                date: curr.date,
                kind: ReversalKind::Bearish,
            });
        }
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars_from_bodies(bodies: &[(f64, f64)]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        bodies
            .iter()
            .enumerate()
            .map(|(i, &(open, close))| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
            })
            .collect()
    }

    #[test]
    fn bullish_reversal_after_bearish_bar() {
        // Bearish 10→8, then bullish 7→11 engulfing it from below.
        let bars = bars_from_bodies(&[(10.0, 8.0), (7.0, 11.0)]);
        let markers = reversal_markers(&bars);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].bar_index, 1);
        assert_eq!(markers[0].date, bars[1].date);
        assert_eq!(markers[0].kind, ReversalKind::Bullish);
    }

    #[test]
    fn bearish_engulfing_after_bullish_bar() {
        // Bullish 8→10, then bearish 11→7.
        let bars = bars_from_bodies(&[(8.0, 10.0), (11.0, 7.0)]);
        let markers = reversal_markers(&bars);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, ReversalKind::Bearish);
    }

    #[test]
    fn non_engulfing_body_is_not_a_reversal() {
        // Bullish bar inside the prior bearish body: opens above prev close.
        let bars = bars_from_bodies(&[(10.0, 8.0), (8.5, 9.5)]);
        assert!(reversal_markers(&bars).is_empty());
    }

    #[test]
    fn first_bar_never_marked() {
        let bars = bars_from_bodies(&[(7.0, 11.0)]);
        assert!(reversal_markers(&bars).is_empty());
    }

    #[test]
    fn doji_neighbors_are_ignored() {
        // Flat bars are neither bullish nor bearish.
        let bars = bars_from_bodies(&[(10.0, 10.0), (7.0, 11.0), (11.0, 11.0)]);
        assert!(reversal_markers(&bars).is_empty());
    }
}
