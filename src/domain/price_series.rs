use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};
use crate::utils::TimeUtils;

/// A single observation in a price series.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// On-disk / over-the-wire shape of a series. Deserializing a [`PriceSeries`]
/// goes through this and is validated on the way in.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PriceSeriesRecord {
    #[serde(default)]
    pub symbol: String,
    pub interval_ms: i64,
    pub points: Vec<PricePoint>,
}

// ============================================================================
// PriceSeries: validated, immutable (timestamp, price) sequence
// ============================================================================

/// Ordered price observations with strictly increasing timestamps and finite prices.
///
/// `interval_ms` is the nominal sampling interval. Cycle periods and pivot
/// spacings are measured in multiples of it, so a daily series with a gap over
/// a weekend still measures that gap as 3 units, not 1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "PriceSeriesRecord", into = "PriceSeriesRecord")]
pub struct PriceSeries {
    symbol: String,
    interval_ms: i64,
    timestamps_ms: Vec<i64>,
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(
        symbol: impl Into<String>,
        interval_ms: i64,
        points: Vec<PricePoint>,
    ) -> CycleResult<Self> {
        if interval_ms <= 0 {
            return Err(CycleError::InvalidInterval(interval_ms));
        }

        let mut timestamps_ms = Vec::with_capacity(points.len());
        let mut prices = Vec::with_capacity(points.len());

        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() {
                return Err(CycleError::NonFinitePrice {
                    index,
                    price: point.price,
                });
            }
            if let Some(&previous_ms) = timestamps_ms.last()
                && point.timestamp_ms <= previous_ms
            {
                return Err(CycleError::NonMonotonicTimestamp {
                    index,
                    timestamp_ms: point.timestamp_ms,
                    previous_ms,
                });
            }
            timestamps_ms.push(point.timestamp_ms);
            prices.push(point.price);
        }

        Ok(Self {
            symbol: symbol.into(),
            interval_ms,
            timestamps_ms,
            prices,
        })
    }

    /// Regularly sampled series starting at `start_ms`.
    pub fn from_prices(
        symbol: impl Into<String>,
        start_ms: i64,
        interval_ms: i64,
        prices: &[f64],
    ) -> CycleResult<Self> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(start_ms + i as i64 * interval_ms, price))
            .collect();
        Self::new(symbol, interval_ms, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn timestamps_ms(&self) -> &[i64] {
        &self.timestamps_ms
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn point(&self, idx: usize) -> PricePoint {
        PricePoint::new(self.timestamps_ms[idx], self.prices[idx])
    }

    pub fn points(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.timestamps_ms
            .iter()
            .zip(self.prices.iter())
            .map(|(&ts, &price)| PricePoint::new(ts, price))
    }

    pub fn index_of(&self, timestamp_ms: i64) -> Option<usize> {
        self.timestamps_ms.binary_search(&timestamp_ms).ok()
    }

    pub fn first_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.first().copied()
    }

    pub fn last_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.last().copied()
    }

    /// Index range of observations with timestamps in `[center - half_width, center + half_width]`.
    pub fn window_around(&self, center_ms: i64, half_width_ms: i64) -> Range<usize> {
        let lo = center_ms.saturating_sub(half_width_ms);
        let hi = center_ms.saturating_add(half_width_ms);
        let start = self.timestamps_ms.partition_point(|&ts| ts < lo);
        let end = self.timestamps_ms.partition_point(|&ts| ts <= hi);
        start..end.max(start)
    }

    /// Signed distance from `from_ms` to `to_ms` in sampling intervals.
    pub fn intervals_between(&self, from_ms: i64, to_ms: i64) -> f64 {
        TimeUtils::intervals_between(from_ms, to_ms, self.interval_ms)
    }
}

impl TryFrom<PriceSeriesRecord> for PriceSeries {
    type Error = CycleError;

    fn try_from(record: PriceSeriesRecord) -> Result<Self, Self::Error> {
        PriceSeries::new(record.symbol, record.interval_ms, record.points)
    }
}

impl From<PriceSeries> for PriceSeriesRecord {
    fn from(series: PriceSeries) -> Self {
        let points = series.points().collect();
        PriceSeriesRecord {
            symbol: series.symbol,
            interval_ms: series.interval_ms,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = TimeUtils::MS_IN_D;

    #[test]
    fn rejects_duplicate_timestamps() {
        let points = vec![
            PricePoint::new(0, 1.0),
            PricePoint::new(DAY, 2.0),
            PricePoint::new(DAY, 3.0),
        ];
        let err = PriceSeries::new("X", DAY, points).unwrap_err();
        assert_eq!(
            err,
            CycleError::NonMonotonicTimestamp {
                index: 2,
                timestamp_ms: DAY,
                previous_ms: DAY,
            }
        );
    }

    #[test]
    fn rejects_decreasing_timestamps() {
        let points = vec![PricePoint::new(DAY, 1.0), PricePoint::new(0, 2.0)];
        assert!(matches!(
            PriceSeries::new("X", DAY, points),
            Err(CycleError::NonMonotonicTimestamp { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_non_finite_prices() {
        let err = PriceSeries::from_prices("X", 0, DAY, &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, CycleError::NonFinitePrice { index: 1, .. }));

        let err = PriceSeries::from_prices("X", 0, DAY, &[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, CycleError::NonFinitePrice { index: 0, .. }));
    }

    #[test]
    fn rejects_non_positive_interval() {
        assert_eq!(
            PriceSeries::from_prices("X", 0, 0, &[1.0]).unwrap_err(),
            CycleError::InvalidInterval(0)
        );
    }

    #[test]
    fn empty_series_is_valid() {
        let series = PriceSeries::new("X", DAY, Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.first_timestamp_ms(), None);
        assert_eq!(series.window_around(0, DAY), 0..0);
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let series = PriceSeries::from_prices("X", 0, DAY, &[0.0; 10]).unwrap();
        assert_eq!(series.window_around(5 * DAY, 2 * DAY), 3..8);
        // Clipped at the start
        assert_eq!(series.window_around(DAY, 3 * DAY), 0..5);
        // Entirely past the end
        assert_eq!(series.window_around(50 * DAY, DAY), 10..10);
    }

    #[test]
    fn deserialization_validates() {
        let good = r#"{ "symbol": "SPX", "interval_ms": 1000,
            "points": [ { "timestamp_ms": 0, "price": 1.0 }, { "timestamp_ms": 1000, "price": 2.0 } ] }"#;
        let series: PriceSeries = serde_json::from_str(good).unwrap();
        assert_eq!(series.symbol(), "SPX");
        assert_eq!(series.prices(), &[1.0, 2.0]);
        assert_eq!(series.index_of(1000), Some(1));

        let bad = r#"{ "interval_ms": 1000,
            "points": [ { "timestamp_ms": 5, "price": 1.0 }, { "timestamp_ms": 5, "price": 2.0 } ] }"#;
        assert!(serde_json::from_str::<PriceSeries>(bad).is_err());
    }
}
