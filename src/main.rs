use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cycle_sniper::data::{SeriesCacheFile, load_params, load_series};
use cycle_sniper::utils::time_utils::epoch_ms_to_utc;
use cycle_sniper::{BreakPolicy, Cli, CycleParams, CycleScanner, MultiSeriesScanner, PriceSeries};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    if args.inputs.is_empty() && args.cache.is_none() {
        bail!("Nothing to scan: pass at least one --input or a --cache file");
    }

    // C. Parameters
    let mut params = match &args.params {
        Some(path) => load_params(path)?,
        None => CycleParams::default(),
    };
    if args.coalesce {
        params = params.with_break_policy(BreakPolicy::Coalesce);
    }
    let periods = args.cycle_periods().context("Invalid --period")?;

    // D. Data Loading
    let mut loaded: Vec<PriceSeries> = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        loaded.push(load_series(path)?);
    }

    if args.write_cache {
        write_caches(&loaded)?;
    }

    let mut monitor = MultiSeriesScanner::new(CycleScanner::new(params)?);
    if let Some(path) = &args.cache {
        let cache = SeriesCacheFile::load_from_path(path)?;
        log::info!(
            "Loaded {} series from cache {:?} (written {})",
            cache.data.len(),
            path,
            epoch_ms_to_utc(cache.timestamp_ms)
        );
        cache.data.into_iter().for_each(|s| monitor.add_series(s));
    }
    loaded.into_iter().for_each(|s| monitor.add_series(s));

    // E. Scan
    log::info!(
        "Scanning {} series across {} period(s)",
        monitor.series_count(),
        periods.len()
    );
    let summaries = if args.breaks_only {
        monitor.summaries_with_breaks(&periods)
    } else {
        monitor
            .scan_all(&periods)
            .iter()
            .map(|report| report.summary())
            .collect()
    };

    for summary in &summaries {
        if let Some(last) = summary.uptrend_breaks.last() {
            log::info!(
                "{} @ {}: latest uptrend break {}",
                summary.symbol,
                summary.period,
                epoch_ms_to_utc(last.timestamp_ms)
            );
        }
        if let Some(last) = summary.downtrend_breaks.last() {
            log::info!(
                "{} @ {}: latest downtrend break {}",
                summary.symbol,
                summary.period,
                epoch_ms_to_utc(last.timestamp_ms)
            );
        }
    }

    // F. Output
    let json = if args.pretty {
        serde_json::to_string_pretty(&summaries)
    } else {
        serde_json::to_string(&summaries)
    }
    .context("Failed to serialize summaries")?;
    println!("{}", json);

    Ok(())
}

/// One cache file per sampling interval
fn write_caches(series: &[PriceSeries]) -> Result<()> {
    let mut by_interval: BTreeMap<i64, Vec<PriceSeries>> = BTreeMap::new();
    for s in series {
        by_interval.entry(s.interval_ms()).or_default().push(s.clone());
    }

    for (interval_ms, group) in by_interval {
        let count = group.len();
        let path = SeriesCacheFile::default_cache_path(interval_ms);
        SeriesCacheFile::new(interval_ms, group)?.save_to_path(&path)?;
        log::info!("Wrote {} series to {:?}", count, path);
    }
    Ok(())
}
