// Domain types and value objects
pub mod cycle_period;
pub mod direction;
pub mod price_series;

// Re-export commonly used types
pub use cycle_period::CyclePeriod;
pub use direction::TrendDirection;
pub use price_series::{PricePoint, PriceSeries, PriceSeriesRecord};
