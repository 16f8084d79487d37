//! File persistence and serialization configuration

use crate::utils::TimeUtils;

/// Directory path for storing series data
pub const SERIES_PATH: &str = "series_data";

/// Base filename for series cache files (without extension)
pub const SERIES_FILENAME_WITHOUT_EXT: &str = "series";

/// Current version of the bincode series cache format
pub const SERIES_CACHE_VERSION: f64 = 1.0;

/// Default output filename for the demo series generator
pub const DEMO_SERIES_FILENAME: &str = "demo_sine_series.json";

/// Generate interval-specific cache filename
/// Example: "series_1d_v1.bin" or "series_1h_v1.bin"
pub fn series_cache_filename(interval_ms: i64) -> String {
    let interval_str = TimeUtils::interval_to_string(interval_ms);
    format!(
        "{}_{}_v{}.bin",
        SERIES_FILENAME_WITHOUT_EXT, interval_str, SERIES_CACHE_VERSION
    )
}
