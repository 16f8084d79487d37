use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CycleError, CycleResult};

/// Nominal cycle length, in sampling intervals of the series it is applied to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct CyclePeriod(f64);

impl CyclePeriod {
    pub fn new(intervals: f64) -> CycleResult<Self> {
        if !intervals.is_finite() || intervals <= 0.0 {
            return Err(CycleError::InvalidPeriod(intervals));
        }
        Ok(Self(intervals))
    }

    #[inline]
    pub fn intervals(&self) -> f64 {
        self.0
    }

    /// Trailing smoothing window for this period, floored at `min_window` samples.
    pub fn smoothing_window(&self, smooth_factor: f64, min_window: usize) -> usize {
        let raw = (self.0 * smooth_factor).round();
        // Saturating float -> int cast keeps absurd factors from overflowing
        (raw as usize).max(min_window)
    }

    /// Converts the period to milliseconds for a series sampled every `interval_ms`.
    pub fn as_ms(&self, interval_ms: i64) -> i64 {
        (self.0 * interval_ms as f64).round() as i64
    }
}

impl TryFrom<f64> for CyclePeriod {
    type Error = CycleError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        CyclePeriod::new(value)
    }
}

impl From<CyclePeriod> for f64 {
    fn from(period: CyclePeriod) -> Self {
        period.0
    }
}

impl fmt::Display for CyclePeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
