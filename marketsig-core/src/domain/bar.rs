//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLC bar for a single instrument on a single day.
///
/// Produced by an external data supplier and immutable afterwards. All
/// derived series (indicators, levels, signals) are computed from validated
/// bars only — see [`validate_series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Close above open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Close below open.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Rejection reasons for a malformed bar series.
///
/// These are the only fatal conditions in the core: corrupt upstream data
/// must never silently reach the simulator. Everything else (short series,
/// flat windows, missing levels) degrades to empty or undefined outputs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BarError {
    #[error("bar {index}: price is not a finite positive number")]
    InvalidPrice { index: usize },

    #[error("bar {index}: high is below low")]
    HighBelowLow { index: usize },

    #[error("bar {index}: date does not increase over previous bar")]
    NonMonotonicDate { index: usize },
}

/// Validate a whole series before any computation.
///
/// An empty series is valid (every downstream stage yields empty output for
/// it); a malformed bar anywhere rejects the whole series.
pub fn validate_series(bars: &[Bar]) -> Result<(), BarError> {
    for (index, bar) in bars.iter().enumerate() {
        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(BarError::InvalidPrice { index });
        }
        if bar.high < bar.low {
            return Err(BarError::HighBelowLow { index });
        }
        if index > 0 && bar.date <= bars[index - 1].date {
            return Err(BarError::NonMonotonicDate { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
        }
    }

    fn sample_series(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let mut bar = sample_bar();
                bar.date = bar.date + chrono::Duration::days(i as i64);
                bar
            })
            .collect()
    }

    #[test]
    fn valid_series_passes() {
        assert_eq!(validate_series(&sample_series(5)), Ok(()));
    }

    #[test]
    fn empty_series_is_valid() {
        assert_eq!(validate_series(&[]), Ok(()));
    }

    #[test]
    fn high_below_low_rejected() {
        let mut bars = sample_series(3);
        bars[1].high = 97.0;
        bars[1].low = 99.0;
        assert_eq!(validate_series(&bars), Err(BarError::HighBelowLow { index: 1 }));
    }

    #[test]
    fn negative_price_rejected() {
        let mut bars = sample_series(3);
        bars[2].low = -1.0;
        assert_eq!(validate_series(&bars), Err(BarError::InvalidPrice { index: 2 }));
    }

    #[test]
    fn nan_price_rejected() {
        let mut bars = sample_series(2);
        bars[0].close = f64::NAN;
        assert_eq!(validate_series(&bars), Err(BarError::InvalidPrice { index: 0 }));
    }

    #[test]
    fn non_monotonic_date_rejected() {
        let mut bars = sample_series(3);
        bars[2].date = bars[1].date;
        assert_eq!(
            validate_series(&bars),
            Err(BarError::NonMonotonicDate { index: 2 })
        );
    }

    #[test]
    fn bullish_bearish_classification() {
        let bar = sample_bar();
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());

        let mut doji = sample_bar();
        doji.close = doji.open;
        assert!(!doji.is_bullish());
        assert!(!doji.is_bearish());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
