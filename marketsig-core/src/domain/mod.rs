//! Domain types for MarketSig.

pub mod bar;
pub mod level;

pub use bar::{validate_series, Bar, BarError};
pub use level::{Level, LevelSet};
