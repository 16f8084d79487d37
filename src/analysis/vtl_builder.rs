#[cfg(debug_assertions)]
use crate::config::PRINT_VTL_ANCHORS;
use crate::domain::PriceSeries;
use crate::models::{Pivot, ValidTrendLine};

/// Builds a trend line through `anchors` (troughs for support, peaks for resistance).
///
/// Returns `None` ("unavailable") when fewer than two usable anchors remain.
/// Anchors must advance in time; any that don't are skipped.
pub fn build_vtl(series: &PriceSeries, anchors: &[Pivot]) -> Option<ValidTrendLine> {
    let mut ordered: Vec<Pivot> = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        if let Some(last) = ordered.last()
            && anchor.timestamp_ms <= last.timestamp_ms
        {
            #[cfg(debug_assertions)]
            if PRINT_VTL_ANCHORS {
                log::warn!(
                    "{}: skipping VTL anchor at {} (not after previous anchor at {})",
                    series.symbol(),
                    anchor.timestamp_ms,
                    last.timestamp_ms
                );
            }
            continue;
        }
        ordered.push(*anchor);
    }

    if ordered.len() < 2 {
        return None;
    }
    Some(ValidTrendLine::from_ordered_anchors(
        ordered,
        series.interval_ms(),
    ))
}
