use std::collections::HashMap;
#[cfg(debug_assertions)]
use std::time::Instant;

use rayon::prelude::*;

use crate::analysis::cycle_scan::CycleScanner;
#[cfg(debug_assertions)]
use crate::config::PRINT_SCAN_TIMINGS;
use crate::domain::{CyclePeriod, PriceSeries};
use crate::models::{CycleReport, CycleSummary};

/// Scans a set of series across several cycle periods.
/// Every (series, period) pair is independent, so jobs fan out over rayon.
pub struct MultiSeriesScanner {
    series: HashMap<String, PriceSeries>,
    scanner: CycleScanner,
}

impl MultiSeriesScanner {
    pub fn new(scanner: CycleScanner) -> Self {
        Self {
            series: HashMap::new(),
            scanner,
        }
    }

    /// Add (or replace) a series, keyed by its symbol
    pub fn add_series(&mut self, series: PriceSeries) {
        let symbol = series.symbol().to_string();
        if self.series.insert(symbol.clone(), series).is_some() {
            log::warn!("Replacing previously loaded series for {}", symbol);
        }
    }

    pub fn get_series(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Loaded symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.series.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn scanner(&self) -> &CycleScanner {
        &self.scanner
    }

    /// One report per (series, period), ordered by symbol then period.
    pub fn scan_all(&self, periods: &[CyclePeriod]) -> Vec<CycleReport> {
        #[cfg(debug_assertions)]
        let started = PRINT_SCAN_TIMINGS.then(Instant::now);

        let jobs: Vec<(&PriceSeries, CyclePeriod)> = self
            .symbols()
            .into_iter()
            .filter_map(|symbol| self.series.get(symbol))
            .flat_map(|series| periods.iter().map(move |&period| (series, period)))
            .collect();

        // Indexed parallel iterators keep input order on collect
        let reports: Vec<CycleReport> = jobs
            .into_par_iter()
            .map(|(series, period)| self.scanner.scan(series, period))
            .collect();

        #[cfg(debug_assertions)]
        if let Some(started) = started {
            log::info!(
                "Scanned {} series x {} periods in {:?}",
                self.series.len(),
                periods.len(),
                started.elapsed()
            );
        }

        reports
    }

    /// Summaries of every scan that produced at least one break
    pub fn summaries_with_breaks(&self, periods: &[CyclePeriod]) -> Vec<CycleSummary> {
        self.scan_all(periods)
            .iter()
            .filter(|report| report.has_breaks())
            .map(CycleReport::summary)
            .collect()
    }
}

impl Default for MultiSeriesScanner {
    fn default() -> Self {
        Self::new(CycleScanner::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const STEP_MS: i64 = 3_600_000;

    fn sine(symbol: &str, n: usize, period: f64) -> PriceSeries {
        let prices: Vec<f64> = (0..n)
            .map(|i| 50.0 + 5.0 * (2.0 * PI * i as f64 / period).sin())
            .collect();
        PriceSeries::from_prices(symbol, 0, STEP_MS, &prices).unwrap()
    }

    fn periods(values: &[f64]) -> Vec<CyclePeriod> {
        values
            .iter()
            .map(|&v| CyclePeriod::new(v).unwrap())
            .collect()
    }

    #[test]
    fn empty_scanner_scans_nothing() {
        let scanner = MultiSeriesScanner::default();
        assert_eq!(scanner.series_count(), 0);
        assert!(scanner.scan_all(&periods(&[40.0])).is_empty());
    }

    #[test]
    fn add_series_replaces_by_symbol() {
        let mut scanner = MultiSeriesScanner::default();
        scanner.add_series(sine("AAA", 100, 40.0));
        scanner.add_series(sine("AAA", 200, 40.0));
        assert_eq!(scanner.series_count(), 1);
        assert_eq!(scanner.get_series("AAA").unwrap().len(), 200);
        assert!(scanner.get_series("BBB").is_none());
    }

    #[test]
    fn reports_are_ordered_by_symbol_then_period() {
        let mut scanner = MultiSeriesScanner::default();
        scanner.add_series(sine("ZZZ", 300, 40.0));
        scanner.add_series(sine("AAA", 300, 40.0));
        scanner.add_series(sine("MMM", 300, 40.0));

        let reports = scanner.scan_all(&periods(&[40.0, 60.0]));
        let keys: Vec<(&str, f64)> = reports
            .iter()
            .map(|r| (r.symbol.as_str(), r.period.intervals()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("AAA", 40.0),
                ("AAA", 60.0),
                ("MMM", 40.0),
                ("MMM", 60.0),
                ("ZZZ", 40.0),
                ("ZZZ", 60.0),
            ]
        );
    }

    #[test]
    fn parallel_results_match_a_direct_scan() {
        let mut multi = MultiSeriesScanner::default();
        let series = sine("ONE", 300, 40.0);
        multi.add_series(series.clone());

        let period = CyclePeriod::new(40.0).unwrap();
        let direct = CycleScanner::default().scan(&series, period);
        let reports = multi.scan_all(&[period]);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].troughs, direct.troughs);
        assert_eq!(reports[0].peaks, direct.peaks);
        assert_eq!(reports[0].uptrend_breaks, direct.uptrend_breaks);
    }

    #[test]
    fn summaries_with_breaks_skips_quiet_series() {
        let mut scanner = MultiSeriesScanner::default();
        // Too short for any phase at period 40, so nothing can break
        scanner.add_series(sine("SHORT", 50, 40.0));
        assert!(
            scanner
                .summaries_with_breaks(&periods(&[40.0]))
                .is_empty()
        );
    }
}
