use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

#[cfg(debug_assertions)]
use crate::config::PRINT_SERDE;
use crate::config::CycleParams;
use crate::domain::PriceSeries;

/// Load a JSON series file. Timestamp and price validation runs during deserialization.
pub fn load_series(path: &Path) -> Result<PriceSeries> {
    let file = File::open(path).context(format!("Failed to open series file: {:?}", path))?;
    let series: PriceSeries = serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse series file: {:?}", path))?;

    #[cfg(debug_assertions)]
    if PRINT_SERDE {
        log::info!(
            "Loaded {} ({} points) from {:?}",
            series.symbol(),
            series.len(),
            path
        );
    }

    Ok(series)
}

pub fn save_series(series: &PriceSeries, path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    let written = if pretty {
        serde_json::to_writer_pretty(writer, series)
    } else {
        serde_json::to_writer(writer, series)
    };
    written.context(format!("Failed to write series to: {}", path.display()))
}

/// Load analysis parameters from JSON. Missing fields take their defaults.
pub fn load_params(path: &Path) -> Result<CycleParams> {
    let file = File::open(path).context(format!("Failed to open params file: {:?}", path))?;
    let params: CycleParams = serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse params file: {:?}", path))?;
    params
        .validate()
        .context(format!("Invalid parameters in {:?}", path))?;
    Ok(params)
}
