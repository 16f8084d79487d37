use serde::{Deserialize, Serialize};

use crate::domain::PricePoint;

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PivotKind {
    Trough,
    Peak,
}

/// A detected cycle extreme: a trough (cycle low) or a peak (cycle high).
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pivot {
    pub kind: PivotKind,
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Cycle low; anchors uptrend support lines
pub type Trough = Pivot;
/// Cycle high; anchors downtrend resistance lines
pub type Peak = Pivot;

impl Pivot {
    pub fn trough(timestamp_ms: i64, price: f64) -> Self {
        Self {
            kind: PivotKind::Trough,
            timestamp_ms,
            price,
        }
    }

    pub fn peak(timestamp_ms: i64, price: f64) -> Self {
        Self {
            kind: PivotKind::Peak,
            timestamp_ms,
            price,
        }
    }

    pub fn from_point(kind: PivotKind, point: PricePoint) -> Self {
        Self {
            kind,
            timestamp_ms: point.timestamp_ms,
            price: point.price,
        }
    }
}
