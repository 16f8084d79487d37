use anyhow::{Context, Result};
use cycle_sniper::config::{CYCLE, DEMO_SERIES_FILENAME, SERIES_PATH};
use cycle_sniper::data::save_series;
use cycle_sniper::utils::TimeUtils;
use cycle_sniper::utils::time_utils::epoch_ms_to_date;
use cycle_sniper::{PricePoint, PriceSeries};
use std::f64::consts::PI;
use std::path::PathBuf;

const DEMO_SYMBOL: &str = "DEMO";
const DEMO_SAMPLES: usize = 600;
// 2024-01-01T00:00:00Z
const DEMO_START_MS: i64 = 1_704_067_200_000;
const DEMO_BASE_PRICE: f64 = 100.0;
const DEMO_AMPLITUDE: f64 = 10.0;
const DEMO_DRIFT_PER_DAY: f64 = 0.02;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    build_demo_series()
}

fn build_demo_series() -> Result<()> {
    let period = CYCLE.default_period;
    let points: Vec<PricePoint> = (0..DEMO_SAMPLES)
        .map(|i| {
            let x = i as f64;
            PricePoint::new(
                DEMO_START_MS + i as i64 * TimeUtils::MS_IN_D,
                DEMO_BASE_PRICE + DEMO_DRIFT_PER_DAY * x + DEMO_AMPLITUDE * (2.0 * PI * x / period).sin(),
            )
        })
        .collect();

    let series = PriceSeries::new(DEMO_SYMBOL, TimeUtils::MS_IN_D, points)
        .context("Failed to build demo series")?;

    let output_path = PathBuf::from(SERIES_PATH).join(DEMO_SERIES_FILENAME);
    save_series(&series, &output_path, true)?;

    log::info!(
        "Demo series written to {:?}: {} daily points from {} to {}, period {}",
        output_path,
        series.len(),
        series.first_timestamp_ms().map(epoch_ms_to_date).unwrap_or_default(),
        series.last_timestamp_ms().map(epoch_ms_to_date).unwrap_or_default(),
        period
    );
    Ok(())
}
