//! Configuration module for the cycle-sniper library.

pub mod analysis;

mod debug; // Private: use crate::config::PRINT_* rather than crate::config::debug::PRINT_*
pub use debug::{
    PRINT_PHASE_EXTRACTION, PRINT_PIVOT_CANDIDATES, PRINT_SCAN_TIMINGS, PRINT_SERDE,
    PRINT_VTL_ANCHORS,
};

pub mod persistence;

// Re-export commonly used items
pub use analysis::{CYCLE, CycleConfig, CycleParams};
pub use persistence::{
    DEMO_SERIES_FILENAME, SERIES_CACHE_VERSION, SERIES_FILENAME_WITHOUT_EXT, SERIES_PATH,
    series_cache_filename,
};
