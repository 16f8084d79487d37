use crate::analysis::phase_extraction::extract_phase;
use crate::analysis::pivot_detection::{detect_peaks, detect_troughs};
use crate::analysis::vtl_breaks::find_breaks_with_policy;
use crate::analysis::vtl_builder::build_vtl;
use crate::config::CycleParams;
use crate::domain::{CyclePeriod, PriceSeries, TrendDirection};
use crate::error::CycleResult;
use crate::models::{CycleReport, PivotKind, SpacingStats};

/// Runs the full phase -> pivots -> VTL -> breaks chain for one (series, period) pair.
///
/// Holds nothing but validated parameters, so a single scanner can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct CycleScanner {
    params: CycleParams,
}

impl Default for CycleScanner {
    fn default() -> Self {
        Self {
            params: CycleParams::default(),
        }
    }
}

impl CycleScanner {
    pub fn new(params: CycleParams) -> CycleResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CycleParams {
        &self.params
    }

    pub fn scan(&self, series: &PriceSeries, period: CyclePeriod) -> CycleReport {
        let p = &self.params;

        let phase = extract_phase(series, period, p.smooth_factor);
        let troughs = detect_troughs(
            series,
            &phase,
            period,
            p.phase_wrap_window,
            p.spacing_tolerance,
        );
        let peaks = detect_peaks(
            series,
            &phase,
            period,
            p.phase_wrap_window,
            p.spacing_tolerance,
        );

        let uptrend_vtl = build_vtl(series, &troughs);
        let downtrend_vtl = build_vtl(series, &peaks);

        let breaks_for = |direction: TrendDirection| {
            let vtl = match direction.anchor_kind() {
                PivotKind::Trough => uptrend_vtl.as_ref(),
                PivotKind::Peak => downtrend_vtl.as_ref(),
            };
            find_breaks_with_policy(series, vtl, direction, p.break_policy)
        };
        let uptrend_breaks = breaks_for(TrendDirection::Uptrend);
        let downtrend_breaks = breaks_for(TrendDirection::Downtrend);

        let trough_spacing = SpacingStats::from_pivots(&troughs, series.interval_ms());

        log::debug!(
            "{} period {}: {} troughs, {} peaks, {} up / {} down breaks",
            series.symbol(),
            period,
            troughs.len(),
            peaks.len(),
            uptrend_breaks.len(),
            downtrend_breaks.len()
        );

        CycleReport {
            symbol: series.symbol().to_string(),
            period,
            params: self.params,
            phase,
            troughs,
            peaks,
            uptrend_vtl,
            downtrend_vtl,
            uptrend_breaks,
            downtrend_breaks,
            trough_spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::vtl_breaks::find_breaks;
    use crate::error::CycleError;
    use crate::models::{BreakPolicy, Pivot};
    use std::f64::consts::PI;

    const STEP_MS: i64 = 86_400_000;

    fn sine_series(n: usize, period: f64) -> PriceSeries {
        let prices: Vec<f64> = (0..n)
            .map(|i| 100.0 + 10.0 * (2.0 * PI * i as f64 / period).sin())
            .collect();
        PriceSeries::from_prices("SINE", 0, STEP_MS, &prices).unwrap()
    }

    #[test]
    fn rejects_invalid_params() {
        let params = CycleParams {
            spacing_tolerance: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            CycleScanner::new(params),
            Err(CycleError::InvalidParams { .. })
        ));
    }

    #[test]
    fn sinusoid_with_default_params() {
        let series = sine_series(300, 80.0);
        let period = CyclePeriod::new(80.0).unwrap();
        let report = CycleScanner::default().scan(&series, period);

        assert!(!report.phase.is_undefined());
        assert!(report.phase.timestamps_ms().windows(2).all(|w| w[0] < w[1]));

        assert!((2..=4).contains(&report.troughs.len()));
        let spacing = report.trough_spacing.unwrap();
        assert!(spacing.min >= 72.0 && spacing.max <= 88.0, "{:?}", spacing);

        // Troughs at matching sine lows give a (near) flat support line
        let vtl = report.uptrend_vtl.as_ref().unwrap();
        assert!(vtl.slope_per_interval().abs() < 0.05);
    }

    #[test]
    fn short_series_reports_nothing() {
        let series = sine_series(60, 80.0);
        let report = CycleScanner::default().scan(&series, CyclePeriod::new(80.0).unwrap());
        assert!(report.phase.is_undefined());
        assert!(report.troughs.is_empty());
        assert!(report.peaks.is_empty());
        assert!(report.uptrend_vtl.is_none());
        assert!(report.downtrend_vtl.is_none());
        assert!(!report.has_breaks());
        assert!(report.trough_spacing.is_none());
    }

    #[test]
    fn support_from_history_catches_a_later_crash() {
        // Line is built from confirmed history, then tested against prices that collapse
        let clean: Vec<f64> = (0..400)
            .map(|i| 100.0 + 0.1 * i as f64 + 5.0 * (2.0 * PI * i as f64 / 50.0).sin())
            .collect();
        let history = PriceSeries::from_prices("CRASH", 0, STEP_MS, &clean).unwrap();
        let report = CycleScanner::default().scan(&history, CyclePeriod::new(50.0).unwrap());
        let vtl = report.uptrend_vtl.as_ref().unwrap();
        // Rising troughs -> rising support
        assert!(vtl.slope_per_interval() > 0.0);

        let mut crashed = clean.clone();
        for price in crashed.iter_mut().skip(395) {
            *price -= 40.0;
        }
        let live = PriceSeries::from_prices("CRASH", 0, STEP_MS, &crashed).unwrap();
        let last_ts = live.last_timestamp_ms().unwrap();

        let every = find_breaks(&live, Some(vtl), TrendDirection::Uptrend);
        let crash_stamps: Vec<i64> = every
            .iter()
            .map(|b| b.timestamp_ms)
            .filter(|&ts| ts >= 395 * STEP_MS)
            .collect();
        assert_eq!(crash_stamps, (395..400).map(|i| i * STEP_MS).collect::<Vec<_>>());

        let coalesced = find_breaks_with_policy(
            &live,
            Some(vtl),
            TrendDirection::Uptrend,
            BreakPolicy::Coalesce,
        );
        assert!(coalesced.len() < every.len());
        assert!(coalesced.iter().any(|b| b.timestamp_ms == 395 * STEP_MS));
        assert!(coalesced.iter().all(|b| b.timestamp_ms != last_ts));
    }

    #[test]
    fn linear_series_with_depressed_last_point() {
        let mut prices: Vec<f64> = (0..50).map(|i| 10.0 + 0.5 * i as f64).collect();
        prices[49] -= 10.0;
        let series = PriceSeries::from_prices("LIN", 0, STEP_MS, &prices).unwrap();

        let troughs = [
            Pivot::trough(10 * STEP_MS, prices[10]),
            Pivot::trough(30 * STEP_MS, prices[30]),
        ];
        let vtl = build_vtl(&series, &troughs);
        let breaks = find_breaks(&series, vtl.as_ref(), TrendDirection::Uptrend);

        assert!(!breaks.is_empty());
        assert!(breaks.iter().any(|b| b.timestamp_ms == 49 * STEP_MS));
        // Every other sample lies on the line
        assert_eq!(breaks.len(), 1);
    }

    #[test]
    fn summary_carries_the_headline_numbers() {
        let series = sine_series(300, 80.0);
        let report = CycleScanner::default().scan(&series, CyclePeriod::new(80.0).unwrap());
        let summary = report.summary();

        assert_eq!(summary.symbol, "SINE");
        assert_eq!(summary.troughs, report.troughs);
        assert_eq!(summary.defined_phase_points, report.phase.defined_count());
        assert!(summary.latest_phase.is_some());
        assert!(summary.uptrend_slope_per_interval.is_some());
        assert!(serde_json::to_string(&summary).is_ok());
    }
}
