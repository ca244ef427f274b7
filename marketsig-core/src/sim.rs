//! Position simulator — fixed-stake replay of Buy/Sell events.
//!
//! Each Buy converts the stake into `stake / price` shares (multiple open
//! buys stack, no sizing cap); each Sell with shares held realizes
//! `price * shares - deployed` and flattens the position. A Sell with no
//! shares held is a no-op. Final ROI relates realized profit to total
//! capital ever deployed.

use serde::{Deserialize, Serialize};

use crate::signals::{SignalDirection, SignalEvent};

/// How deployed capital is accounted across buy/sell cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashPolicy {
    /// Deployed capital is rezeroed together with shares on each realizing
    /// sell, so each cycle's profit is measured against its own buys.
    #[default]
    ResetOnSell,

    /// Deployed capital accumulates across cycles and every sell realizes
    /// against the running total. Reproduces the original accounting, which
    /// never reset the denominator.
    Accumulate,
}

/// Simulation outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Total capital ever deployed (sum of stakes across all buys).
    pub cash_deployed: f64,
    pub realized_profit: f64,
    /// `realized_profit / cash_deployed * 100`, 0 when nothing was deployed.
    pub roi_pct: f64,
}

/// Mutable accumulator state, owned by one simulation run.
#[derive(Debug, Clone, Copy, Default)]
struct SimState {
    /// Capital backing the currently open position (subject to `CashPolicy`).
    open_deployed: f64,
    /// Capital ever deployed; the ROI denominator.
    total_deployed: f64,
    shares_held: f64,
    realized_profit: f64,
}

/// Replay events in bar order against a fixed per-trade stake.
///
/// Events must come from a single generator pass, already ordered by bar
/// index (the `scan` driver guarantees this).
pub fn simulate(events: &[SignalEvent], stake: f64, policy: CashPolicy) -> SimReport {
    assert!(stake > 0.0, "trade stake must be positive");

    let mut state = SimState::default();

    for event in events {
        match event.direction {
            SignalDirection::Buy => {
                state.shares_held += stake / event.price;
                state.open_deployed += stake;
                state.total_deployed += stake;
            }
            SignalDirection::Sell if state.shares_held > 0.0 => {
                state.realized_profit += event.price * state.shares_held - state.open_deployed;
                state.shares_held = 0.0;
                if policy == CashPolicy::ResetOnSell {
                    state.open_deployed = 0.0;
                }
            }
            SignalDirection::Sell => {} // nothing held: no-op
        }
    }

    let roi_pct = if state.total_deployed > 0.0 {
        state.realized_profit / state.total_deployed * 100.0
    } else {
        0.0
    };

    SimReport {
        cash_deployed: state.total_deployed,
        realized_profit: state.realized_profit,
        roi_pct,
    }
}
