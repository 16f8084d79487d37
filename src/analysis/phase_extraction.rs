//! Phase extraction: price -> trailing average -> analytic-signal phase.
//!
//! The Hilbert transform here is computed over the whole smoothed sequence at
//! once, so it is not causal. Appending new prices can move the phase of
//! earlier timestamps (mostly near the end of the series). A streaming caller
//! has to either recompute over a trailing window or accept that the most
//! recent phases are provisional.

use crate::config::CYCLE;
#[cfg(debug_assertions)]
use crate::config::PRINT_PHASE_EXTRACTION;
use crate::domain::{CyclePeriod, PriceSeries};
use crate::models::PhaseCurve;
use crate::utils::maths_utils::{
    analytic_signal_angles, angle_to_cycle_fraction, detrend_linear, trailing_moving_average,
};

/// Extracts the cycle phase of `series` for a nominal `period`.
///
/// Returns an entirely undefined curve when fewer than `3 * period` smoothed
/// samples are available; a short series is not an error.
pub fn extract_phase(series: &PriceSeries, period: CyclePeriod, smooth_factor: f64) -> PhaseCurve {
    let window = period.smoothing_window(smooth_factor, CYCLE.phase.min_smooth_window);
    let smoothed = trailing_moving_average(series.prices(), window);
    let required = (CYCLE.phase.min_periods_of_history * period.intervals()).ceil() as usize;

    #[cfg(debug_assertions)]
    if PRINT_PHASE_EXTRACTION {
        log::debug!(
            "[phase] {} period {} window {} -> {} smoothed samples (need {})",
            series.symbol(),
            period,
            window,
            smoothed.len(),
            required
        );
    }

    if smoothed.is_empty() || smoothed.len() < required {
        return PhaseCurve::undefined(series, period, window);
    }

    // Remove the price level and drift, otherwise the analytic angle hugs zero
    let angles = analytic_signal_angles(&detrend_linear(&smoothed));

    // The first smoothed value belongs to the last sample of the first full window
    let offset = window - 1;
    let mut phases = vec![None; series.len()];
    for (k, angle) in angles.into_iter().enumerate() {
        phases[offset + k] = Some(angle_to_cycle_fraction(angle));
    }

    PhaseCurve::new(series, period, window, phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_series(n: usize, period: f64) -> PriceSeries {
        let prices: Vec<f64> = (0..n)
            .map(|i| 100.0 + 10.0 * (2.0 * PI * i as f64 / period).sin())
            .collect();
        PriceSeries::from_prices("SINE", 0, 1_000, &prices).unwrap()
    }

    #[test]
    fn phase_is_half_open_unit_interval() {
        let series = sine_series(300, 80.0);
        let curve = extract_phase(&series, CyclePeriod::new(80.0).unwrap(), 0.5);

        assert_eq!(curve.len(), 300);
        assert!(!curve.is_undefined());
        for phase in curve.phases().iter().flatten() {
            assert!((0.0..1.0).contains(phase), "phase {} out of range", phase);
        }
    }

    #[test]
    fn undefined_before_first_full_window() {
        let series = sine_series(300, 80.0);
        let curve = extract_phase(&series, CyclePeriod::new(80.0).unwrap(), 0.5);

        // window = round(80 * 0.5) = 40 -> first defined at index 39
        assert_eq!(curve.smoothing_window, 40);
        assert_eq!(curve.first_defined_index(), Some(39));
        assert!(curve.phases()[..39].iter().all(|p| p.is_none()));
        assert!(curve.phases()[39..].iter().all(|p| p.is_some()));
    }

    #[test]
    fn timestamps_follow_the_series() {
        let series = sine_series(300, 80.0);
        let curve = extract_phase(&series, CyclePeriod::new(80.0).unwrap(), 0.5);
        assert_eq!(curve.timestamps_ms(), series.timestamps_ms());
        assert!(curve.timestamps_ms().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn short_series_is_entirely_undefined() {
        // 100 samples, window 40 -> 61 smoothed < 240 required
        let series = sine_series(100, 80.0);
        let curve = extract_phase(&series, CyclePeriod::new(80.0).unwrap(), 0.5);
        assert_eq!(curve.len(), 100);
        assert!(curve.is_undefined());
    }

    #[test]
    fn series_shorter_than_window_is_undefined() {
        let series = sine_series(2, 80.0);
        let curve = extract_phase(&series, CyclePeriod::new(80.0).unwrap(), 0.5);
        assert!(curve.is_undefined());

        let empty = PriceSeries::new("EMPTY", 1_000, Vec::new()).unwrap();
        let curve = extract_phase(&empty, CyclePeriod::new(80.0).unwrap(), 0.5);
        assert!(curve.is_empty());
    }

    #[test]
    fn phase_advances_through_a_cycle() {
        // Count wraps: a clean sinusoid should complete roughly one cycle per period
        let series = sine_series(400, 50.0);
        let curve = extract_phase(&series, CyclePeriod::new(50.0).unwrap(), 0.5);
        let defined: Vec<f64> = curve.phases().iter().flatten().copied().collect();

        let wraps = defined
            .windows(2)
            .filter(|w| w[0] > 0.85 && w[1] < 0.15)
            .count();
        // 400 - 24 = 376 defined samples ~ 7.5 cycles
        assert!((6..=8).contains(&wraps), "unexpected wrap count {}", wraps);
    }
}
