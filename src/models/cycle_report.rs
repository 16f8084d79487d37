use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::config::CycleParams;
use crate::domain::CyclePeriod;
use crate::models::{BreakEvent, PhaseCurve, Pivot, ValidTrendLine};
use crate::utils::TimeUtils;

/// Distribution of gaps between consecutive pivots, in sampling intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingStats {
    pub gaps: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SpacingStats {
    /// `None` unless there are at least two pivots (one gap).
    pub fn from_pivots(pivots: &[Pivot], interval_ms: i64) -> Option<Self> {
        if pivots.len() < 2 {
            return None;
        }
        let gaps: Vec<f64> = pivots
            .windows(2)
            .map(|w| TimeUtils::intervals_between(w[0].timestamp_ms, w[1].timestamp_ms, interval_ms))
            .collect();

        Some(Self {
            gaps: gaps.len(),
            mean: gaps.iter().mean(),
            // Population form so a single gap reports 0 rather than NaN
            std_dev: gaps.iter().population_std_dev(),
            // UFCS: Iterator::min/max would shadow these
            min: Statistics::min(gaps.iter()),
            max: Statistics::max(gaps.iter()),
        })
    }
}

/// Everything the core derives for one (series, period) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub symbol: String,
    pub period: CyclePeriod,
    pub params: CycleParams,
    pub phase: PhaseCurve,
    pub troughs: Vec<Pivot>,
    pub peaks: Vec<Pivot>,
    pub uptrend_vtl: Option<ValidTrendLine>,
    pub downtrend_vtl: Option<ValidTrendLine>,
    pub uptrend_breaks: Vec<BreakEvent>,
    pub downtrend_breaks: Vec<BreakEvent>,
    pub trough_spacing: Option<SpacingStats>,
}

/// Compact, presentation-friendly view of a [`CycleReport`] (no per-timestamp curves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSummary {
    pub symbol: String,
    pub period: CyclePeriod,
    pub defined_phase_points: usize,
    pub latest_phase: Option<f64>,
    pub troughs: Vec<Pivot>,
    pub peaks: Vec<Pivot>,
    pub trough_spacing: Option<SpacingStats>,
    pub uptrend_slope_per_interval: Option<f64>,
    pub downtrend_slope_per_interval: Option<f64>,
    pub uptrend_breaks: Vec<BreakEvent>,
    pub downtrend_breaks: Vec<BreakEvent>,
}

impl CycleReport {
    pub fn has_breaks(&self) -> bool {
        !self.uptrend_breaks.is_empty() || !self.downtrend_breaks.is_empty()
    }

    pub fn summary(&self) -> CycleSummary {
        CycleSummary {
            symbol: self.symbol.clone(),
            period: self.period,
            defined_phase_points: self.phase.defined_count(),
            latest_phase: self.phase.phases().last().copied().flatten(),
            troughs: self.troughs.clone(),
            peaks: self.peaks.clone(),
            trough_spacing: self.trough_spacing,
            uptrend_slope_per_interval: self.uptrend_vtl.as_ref().map(|v| v.slope_per_interval()),
            downtrend_slope_per_interval: self
                .downtrend_vtl
                .as_ref()
                .map(|v| v.slope_per_interval()),
            uptrend_breaks: self.uptrend_breaks.clone(),
            downtrend_breaks: self.downtrend_breaks.clone(),
        }
    }
}
