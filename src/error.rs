//! Typed errors raised at the library boundary.
//!
//! Insufficient data is never an error here: short series produce an undefined
//! phase curve, an empty trough list or an unavailable trend line. Errors are
//! reserved for input that must not reach the analysis at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CycleError {
    #[error("Malformed series: timestamp {timestamp_ms} at index {index} does not strictly increase (previous {previous_ms})")]
    NonMonotonicTimestamp {
        index: usize,
        timestamp_ms: i64,
        previous_ms: i64,
    },

    #[error("Malformed series: price at index {index} is not finite ({price})")]
    NonFinitePrice { index: usize, price: f64 },

    #[error("Malformed series: sampling interval must be positive, got {0} ms")]
    InvalidInterval(i64),

    #[error("Invalid cycle period: {0} (must be finite and > 0)")]
    InvalidPeriod(f64),

    #[error("Invalid params: {field} = {value} out of range {range}")]
    InvalidParams {
        field: &'static str,
        value: f64,
        range: &'static str,
    },
}

pub type CycleResult<T> = std::result::Result<T, CycleError>;
