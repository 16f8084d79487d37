// Domain models for cycle analysis
// These modules contain pure data produced by the analysis stages, independent of I/O

pub mod break_event;
pub mod cycle_report;
pub mod phase_curve;
pub mod pivot;
pub mod trend_line;

// Re-export key types for convenience
pub use break_event::{BreakEvent, BreakPolicy};
pub use cycle_report::{CycleReport, CycleSummary, SpacingStats};
pub use phase_curve::PhaseCurve;
pub use pivot::{Peak, Pivot, PivotKind, Trough};
pub use trend_line::ValidTrendLine;
