use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::models::Pivot;

/// Piecewise-linear trend line through an ordered set of pivots.
///
/// Undefined before the first anchor, interpolated between anchors, and
/// extrapolated past the last anchor along the final segment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidTrendLine {
    anchors: Vec<Pivot>,
    interval_ms: i64,
}

impl ValidTrendLine {
    /// Callers guarantee >= 2 anchors with strictly increasing timestamps.
    pub(crate) fn from_ordered_anchors(anchors: Vec<Pivot>, interval_ms: i64) -> Self {
        debug_assert!(anchors.len() >= 2);
        debug_assert!(
            anchors
                .windows(2)
                .all(|w| w[0].timestamp_ms < w[1].timestamp_ms)
        );
        Self {
            anchors,
            interval_ms,
        }
    }

    pub fn anchors(&self) -> &[Pivot] {
        &self.anchors
    }

    pub fn first_anchor(&self) -> &Pivot {
        &self.anchors[0]
    }

    pub fn last_anchor(&self) -> &Pivot {
        &self.anchors[self.anchors.len() - 1]
    }

    /// Line value at `timestamp_ms`, or `None` before the first anchor.
    pub fn value_at(&self, timestamp_ms: i64) -> Option<f64> {
        if timestamp_ms < self.first_anchor().timestamp_ms {
            return None;
        }

        // Number of anchors at or before the timestamp (always >= 1 here)
        let at_or_before = self
            .anchors
            .partition_point(|a| a.timestamp_ms <= timestamp_ms);
        let left = &self.anchors[at_or_before - 1];
        if left.timestamp_ms == timestamp_ms {
            return Some(left.price);
        }

        if at_or_before < self.anchors.len() {
            let right = &self.anchors[at_or_before];
            Some(project(left, right, left, timestamp_ms))
        } else {
            let n = self.anchors.len();
            let (prev, last) = (&self.anchors[n - 2], &self.anchors[n - 1]);
            Some(project(prev, last, last, timestamp_ms))
        }
    }

    /// Price change per sampling interval along the final segment (the extrapolation slope).
    pub fn slope_per_interval(&self) -> f64 {
        let n = self.anchors.len();
        segment_slope_ms(&self.anchors[n - 2], &self.anchors[n - 1]) * self.interval_ms as f64
    }

    /// Line values evaluated at every timestamp of `series`.
    pub fn curve(&self, series: &PriceSeries) -> Vec<Option<f64>> {
        series
            .timestamps_ms()
            .iter()
            .map(|&ts| self.value_at(ts))
            .collect()
    }
}

fn segment_slope_ms(from: &Pivot, to: &Pivot) -> f64 {
    (to.price - from.price) / (to.timestamp_ms - from.timestamp_ms) as f64
}

/// Value at `timestamp_ms` on the line through `from` -> `to`, measured from `base`.
// Multiply before dividing so whole-number inputs stay exact.
fn project(from: &Pivot, to: &Pivot, base: &Pivot, timestamp_ms: i64) -> f64 {
    let rise = to.price - from.price;
    let run = (to.timestamp_ms - from.timestamp_ms) as f64;
    base.price + rise * (timestamp_ms - base.timestamp_ms) as f64 / run
}
