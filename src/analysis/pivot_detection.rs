//! Trough and peak detection from a phase curve.
//!
//! A trough candidate is a phase wrap (near 1 -> near 0); a peak candidate is a
//! half-cycle crossing (just below 0.5 -> at/above 0.5). Each candidate is
//! resolved to the actual price extreme within one period either side, then
//! candidates closer than `period * (1 - spacing_tolerance)` to the previously
//! accepted pivot are dropped.

use itertools::Itertools;

#[cfg(debug_assertions)]
use crate::config::PRINT_PIVOT_CANDIDATES;
use crate::domain::{CyclePeriod, PriceSeries};
use crate::models::{Peak, PhaseCurve, Pivot, PivotKind, Trough};
use crate::utils::maths_utils::{argmax, argmin};

/// Phase of the half-cycle point watched for peaks
const HALF_CYCLE: f64 = 0.5;

/// Detects cycle troughs of `series` from its phase curve.
pub fn detect_troughs(
    series: &PriceSeries,
    phase: &PhaseCurve,
    period: CyclePeriod,
    phase_wrap_window: f64,
    spacing_tolerance: f64,
) -> Vec<Trough> {
    detect_pivots(
        PivotKind::Trough,
        series,
        phase,
        period,
        phase_wrap_window,
        spacing_tolerance,
    )
}

/// Detects cycle peaks of `series` from its phase curve.
pub fn detect_peaks(
    series: &PriceSeries,
    phase: &PhaseCurve,
    period: CyclePeriod,
    phase_wrap_window: f64,
    spacing_tolerance: f64,
) -> Vec<Peak> {
    detect_pivots(
        PivotKind::Peak,
        series,
        phase,
        period,
        phase_wrap_window,
        spacing_tolerance,
    )
}

fn is_candidate(kind: PivotKind, previous: f64, current: f64, window: f64) -> bool {
    match kind {
        PivotKind::Trough => previous > 1.0 - window && current < window,
        PivotKind::Peak => {
            previous < HALF_CYCLE
                && current >= HALF_CYCLE
                && previous > HALF_CYCLE - window
                && current < HALF_CYCLE + window
        }
    }
}

/// Indices of timestamps where the phase crosses the boundary watched for `kind`.
fn candidate_indices(kind: PivotKind, phase: &PhaseCurve, window: f64) -> Vec<usize> {
    phase
        .phases()
        .iter()
        .enumerate()
        .tuple_windows()
        .filter_map(|((_, previous), (idx, current))| match (previous, current) {
            (Some(p), Some(c)) if is_candidate(kind, *p, *c, window) => Some(idx),
            _ => None,
        })
        .collect()
}

/// Index of the price extreme within one period of `center_idx`.
fn resolve_candidate(
    kind: PivotKind,
    series: &PriceSeries,
    center_idx: usize,
    half_width_ms: i64,
) -> Option<usize> {
    let center_ms = series.timestamps_ms()[center_idx];
    let range = series.window_around(center_ms, half_width_ms);
    let prices = &series.prices()[range.clone()];
    let offset = match kind {
        PivotKind::Trough => argmin(prices)?,
        PivotKind::Peak => argmax(prices)?,
    };
    Some(range.start + offset)
}

fn detect_pivots(
    kind: PivotKind,
    series: &PriceSeries,
    phase: &PhaseCurve,
    period: CyclePeriod,
    phase_wrap_window: f64,
    spacing_tolerance: f64,
) -> Vec<Pivot> {
    if phase.is_undefined() || series.is_empty() {
        return Vec::new();
    }
    // Candidate indices are only meaningful on the series the curve was extracted from
    if phase.timestamps_ms() != series.timestamps_ms() {
        log::warn!(
            "{}: phase curve ({} points) is not aligned with the series ({} points), no {}s detected",
            series.symbol(),
            phase.len(),
            series.len(),
            kind
        );
        return Vec::new();
    }

    let half_width_ms = period.as_ms(series.interval_ms());
    let min_gap = period.intervals() * (1.0 - spacing_tolerance);

    let mut accepted: Vec<Pivot> = Vec::new();
    for candidate_idx in candidate_indices(kind, phase, phase_wrap_window) {
        let Some(resolved_idx) = resolve_candidate(kind, series, candidate_idx, half_width_ms)
        else {
            continue;
        };
        let pivot = Pivot::from_point(kind, series.point(resolved_idx));

        // A resolution at or before the last accepted pivot gives a gap <= 0 and is dropped too
        if let Some(last) = accepted.last() {
            let gap = series.intervals_between(last.timestamp_ms, pivot.timestamp_ms);
            if gap < min_gap {
                #[cfg(debug_assertions)]
                if PRINT_PIVOT_CANDIDATES {
                    log::debug!(
                        "[pivots] {} {} candidate @{} -> @{} dropped (gap {:.2} < {:.2})",
                        series.symbol(),
                        kind,
                        candidate_idx,
                        resolved_idx,
                        gap,
                        min_gap
                    );
                }
                continue;
            }
        }

        #[cfg(debug_assertions)]
        if PRINT_PIVOT_CANDIDATES {
            log::debug!(
                "[pivots] {} {} candidate @{} -> @{} accepted at {:.4}",
                series.symbol(),
                kind,
                candidate_idx,
                resolved_idx,
                pivot.price
            );
        }
        accepted.push(pivot);
    }

    accepted.sort_by_key(|p| p.timestamp_ms);
    accepted.dedup_by_key(|p| p.timestamp_ms);
    accepted
}
