use serde::{Deserialize, Serialize};

use crate::domain::{CyclePeriod, PriceSeries};

/// Per-timestamp cycle phase for one (series, period) pair.
///
/// Phases are fractions of a cycle in `[0, 1)`; `None` marks timestamps without
/// enough trailing history (or a series too short to extract any phase at all).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhaseCurve {
    pub period: CyclePeriod,
    /// Trailing window used to smooth price before the transform
    pub smoothing_window: usize,
    timestamps_ms: Vec<i64>,
    phases: Vec<Option<f64>>,
}

impl PhaseCurve {
    pub(crate) fn new(
        series: &PriceSeries,
        period: CyclePeriod,
        smoothing_window: usize,
        phases: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(series.len(), phases.len());
        Self {
            period,
            smoothing_window,
            timestamps_ms: series.timestamps_ms().to_vec(),
            phases,
        }
    }

    /// A curve aligned to `series` with no defined values.
    pub fn undefined(series: &PriceSeries, period: CyclePeriod, smoothing_window: usize) -> Self {
        Self::new(series, period, smoothing_window, vec![None; series.len()])
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn timestamps_ms(&self) -> &[i64] {
        &self.timestamps_ms
    }

    pub fn phases(&self) -> &[Option<f64>] {
        &self.phases
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.phases.get(idx).copied().flatten()
    }

    pub fn phase_at(&self, timestamp_ms: i64) -> Option<f64> {
        let idx = self.timestamps_ms.binary_search(&timestamp_ms).ok()?;
        self.get(idx)
    }

    pub fn defined_count(&self) -> usize {
        self.phases.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_undefined(&self) -> bool {
        self.defined_count() == 0
    }

    pub fn first_defined_index(&self) -> Option<usize> {
        self.phases.iter().position(|p| p.is_some())
    }

    /// Degree representation (phase * 360) for plotting.
    pub fn angles(&self) -> Vec<Option<f64>> {
        self.phases.iter().map(|p| p.map(|v| v * 360.0)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Option<f64>)> + '_ {
        self.timestamps_ms
            .iter()
            .copied()
            .zip(self.phases.iter().copied())
    }
}
