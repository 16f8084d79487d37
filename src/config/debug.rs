//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg(debug_assertions)`
//! at the call site.

/// Emit the smoothing window and defined-sample count for each phase extraction.
pub const PRINT_PHASE_EXTRACTION: bool = false;

/// Emit every wrap candidate and how it was resolved (accepted or dropped for spacing).
pub const PRINT_PIVOT_CANDIDATES: bool = false;

/// Emit anchors dropped by the VTL builder because they do not advance in time.
pub const PRINT_VTL_ANCHORS: bool = true;

/// Emit per-job timings from the multi-series scanner.
pub const PRINT_SCAN_TIMINGS: bool = false;

/// Emit detailed serialization/deserialization logs.
pub const PRINT_SERDE: bool = false;
