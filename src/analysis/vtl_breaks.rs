use crate::domain::{PriceSeries, TrendDirection};
use crate::models::{BreakEvent, BreakPolicy, ValidTrendLine};

/// Every timestamp at which `series` violates `vtl` for `direction`.
///
/// An unavailable line (`None`) yields no breaks.
pub fn find_breaks(
    series: &PriceSeries,
    vtl: Option<&ValidTrendLine>,
    direction: TrendDirection,
) -> Vec<BreakEvent> {
    find_breaks_with_policy(series, vtl, direction, BreakPolicy::EveryTimestamp)
}

/// As [`find_breaks`], with control over how consecutive breaching timestamps are reported.
pub fn find_breaks_with_policy(
    series: &PriceSeries,
    vtl: Option<&ValidTrendLine>,
    direction: TrendDirection,
    policy: BreakPolicy,
) -> Vec<BreakEvent> {
    let Some(vtl) = vtl else {
        return Vec::new();
    };

    let mut breaks = Vec::new();
    let mut in_episode = false;

    for point in series.points() {
        let Some(vtl_value) = vtl.value_at(point.timestamp_ms) else {
            continue;
        };

        if !direction.is_breach(point.price, vtl_value) {
            in_episode = false;
            continue;
        }

        if policy == BreakPolicy::Coalesce && in_episode {
            continue;
        }
        in_episode = true;

        breaks.push(BreakEvent {
            timestamp_ms: point.timestamp_ms,
            direction,
            price: point.price,
            vtl_value,
        });
    }

    breaks
}
