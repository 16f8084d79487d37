// Series files (JSON), params files, and the binary series cache
pub mod cache_file;
pub mod series_file;

// Re-export commonly used types
pub use cache_file::SeriesCacheFile;
pub use series_file::{load_params, load_series, save_series};
