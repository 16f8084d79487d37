//! Cycle analysis configuration

use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};
use crate::models::BreakPolicy;

/// Defaults for the phase extractor
pub struct PhaseSettings {
    // Smoothing window as a fraction of the nominal period
    pub smooth_factor: f64,
    // Floor on the smoothing window (in samples)
    pub min_smooth_window: usize,
    // Number of whole periods of smoothed history needed before a phase is produced
    pub min_periods_of_history: f64,
}

/// Defaults for trough/peak detection
pub struct PivotSettings {
    // How close to the 1 -> 0 boundary the phase must be on each side of a wrap
    pub phase_wrap_window: f64,
    // Minimum pivot spacing is period * (1 - spacing_tolerance)
    pub spacing_tolerance: f64,
}

/// The Master Cycle Configuration
pub struct CycleConfig {
    // Period used by the CLI when none is given (in sampling intervals)
    pub default_period: f64,

    // Sub-groups
    pub phase: PhaseSettings,
    pub pivots: PivotSettings,
}

pub const CYCLE: CycleConfig = CycleConfig {
    default_period: 80.0,

    phase: PhaseSettings {
        smooth_factor: 0.5,
        min_smooth_window: 3,
        min_periods_of_history: 3.0,
    },

    pivots: PivotSettings {
        phase_wrap_window: 0.15,
        spacing_tolerance: 0.4,
    },
};

/// Runtime tunables supplied by the caller.
///
/// Any field missing from a params file falls back to the [`CYCLE`] default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleParams {
    /// Smoothing window = max(3, round(period * smooth_factor))
    pub smooth_factor: f64,
    /// Wrap-detection sensitivity, in (0, 0.5]
    pub phase_wrap_window: f64,
    /// Minimum inter-pivot spacing as a fraction of period, in [0, 1)
    pub spacing_tolerance: f64,
    pub break_policy: BreakPolicy,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            smooth_factor: CYCLE.phase.smooth_factor,
            phase_wrap_window: CYCLE.pivots.phase_wrap_window,
            spacing_tolerance: CYCLE.pivots.spacing_tolerance,
            break_policy: BreakPolicy::default(),
        }
    }
}

impl CycleParams {
    pub fn validate(&self) -> CycleResult<()> {
        if !self.smooth_factor.is_finite() || self.smooth_factor <= 0.0 {
            return Err(CycleError::InvalidParams {
                field: "smooth_factor",
                value: self.smooth_factor,
                range: "(0, inf)",
            });
        }
        if !(self.phase_wrap_window > 0.0 && self.phase_wrap_window <= 0.5) {
            return Err(CycleError::InvalidParams {
                field: "phase_wrap_window",
                value: self.phase_wrap_window,
                range: "(0, 0.5]",
            });
        }
        if !(self.spacing_tolerance >= 0.0 && self.spacing_tolerance < 1.0) {
            return Err(CycleError::InvalidParams {
                field: "spacing_tolerance",
                value: self.spacing_tolerance,
                range: "[0, 1)",
            });
        }
        Ok(())
    }

    pub fn with_break_policy(mut self, break_policy: BreakPolicy) -> Self {
        self.break_policy = break_policy;
        self
    }
}
