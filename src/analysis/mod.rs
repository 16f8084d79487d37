// Cycle analysis stages: phase -> pivots -> trend lines -> breaks
pub mod cycle_scan;
pub mod multi_series_scanner;
pub mod phase_extraction;
pub mod pivot_detection;
pub mod vtl_breaks;
pub mod vtl_builder;

// Re-export commonly used types
pub use cycle_scan::CycleScanner;
pub use multi_series_scanner::MultiSeriesScanner;
pub use phase_extraction::extract_phase;
pub use pivot_detection::{detect_peaks, detect_troughs};
pub use vtl_breaks::{find_breaks, find_breaks_with_policy};
pub use vtl_builder::build_vtl;
