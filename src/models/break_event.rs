use serde::{Deserialize, Serialize};

use crate::domain::TrendDirection;

/// A timestamp at which price violated a trend line.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BreakEvent {
    pub timestamp_ms: i64,
    pub direction: TrendDirection,
    pub price: f64,
    pub vtl_value: f64,
}

impl BreakEvent {
    /// How far price sits on the wrong side of the line (always positive for a break).
    pub fn penetration(&self) -> f64 {
        match self.direction {
            TrendDirection::Uptrend => self.vtl_value - self.price,
            TrendDirection::Downtrend => self.price - self.vtl_value,
        }
    }
}

/// How consecutive breaching timestamps are reported.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakPolicy {
    /// One event per breaching timestamp
    #[default]
    EveryTimestamp,
    /// One event per run of consecutive breaching timestamps (the first of the run)
    Coalesce,
}
