//! Support/resistance level types.

use serde::{Deserialize, Serialize};

/// A price level together with how many local extrema touched it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    pub touches: usize,
}

/// The four levels reported by detection.
///
/// `most_support` / `most_resistance` (highest touch count) are the levels
/// signal generation uses — the price the market repeatedly respected, not
/// merely the extreme. `None` means no candidate existed; level-dependent
/// signal sources then emit zero events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub lowest_support: Option<Level>,
    pub most_support: Option<Level>,
    pub highest_resistance: Option<Level>,
    pub most_resistance: Option<Level>,
}

impl LevelSet {
    /// Price of the most-touched support, if defined.
    pub fn support_price(&self) -> Option<f64> {
        self.most_support.map(|l| l.price)
    }

    /// Price of the most-touched resistance, if defined.
    pub fn resistance_price(&self) -> Option<f64> {
        self.most_resistance.map(|l| l.price)
    }
}
