use serde::{Deserialize, Serialize};

use crate::models::PivotKind;

/// Which side of a trend line is being defended.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrendDirection {
    /// Support line through troughs; broken when price drops below it
    Uptrend,
    /// Resistance line through peaks; broken when price rises above it
    Downtrend,
}

impl TrendDirection {
    /// True when `price` violates a line at `line_value` for this direction.
    pub fn is_breach(&self, price: f64, line_value: f64) -> bool {
        match self {
            TrendDirection::Uptrend => price < line_value,
            TrendDirection::Downtrend => price > line_value,
        }
    }

    /// The pivot type whose sequence anchors a line for this direction.
    pub fn anchor_kind(&self) -> PivotKind {
        match self {
            TrendDirection::Uptrend => PivotKind::Trough,
            TrendDirection::Downtrend => PivotKind::Peak,
        }
    }
}
