#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{
    CycleScanner, MultiSeriesScanner, build_vtl, detect_peaks, detect_troughs, extract_phase,
    find_breaks, find_breaks_with_policy,
};
pub use config::CycleParams;
pub use domain::{CyclePeriod, PricePoint, PriceSeries, TrendDirection};
pub use error::{CycleError, CycleResult};
pub use models::{
    BreakEvent, BreakPolicy, CycleReport, CycleSummary, PhaseCurve, Pivot, PivotKind,
    ValidTrendLine,
};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Cycle phase, trough and VTL break scanner", long_about = None)]
pub struct Cli {
    /// JSON series file to scan (repeatable)
    #[arg(short, long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Bincode series cache to scan alongside the JSON inputs
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Nominal cycle period in sampling intervals (repeatable)
    #[arg(short, long = "period", default_values_t = [config::CYCLE.default_period])]
    pub periods: Vec<f64>,

    /// JSON file of analysis parameters; missing fields take defaults
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Report only the first break of each consecutive run
    #[arg(long, default_value_t = false)]
    pub coalesce: bool,

    /// Only print summaries that contain at least one break
    #[arg(long, default_value_t = false)]
    pub breaks_only: bool,

    /// Snapshot the JSON inputs into the default bincode cache
    #[arg(long, default_value_t = false)]
    pub write_cache: bool,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    /// Validated periods, in the order given
    pub fn cycle_periods(&self) -> CycleResult<Vec<CyclePeriod>> {
        self.periods.iter().map(|&p| CyclePeriod::new(p)).collect()
    }
}
