use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::PRINT_SERDE;
use crate::config::{SERIES_CACHE_VERSION, SERIES_PATH, series_cache_filename};
use crate::domain::PriceSeries;

/// Binary (bincode) snapshot of a set of series sharing one sampling interval.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeriesCacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub interval_ms: i64,
    pub data: Vec<PriceSeries>,
}

impl SeriesCacheFile {
    /// Fails if any series was sampled at a different interval.
    pub fn new(interval_ms: i64, data: Vec<PriceSeries>) -> Result<Self> {
        if let Some(odd) = data.iter().find(|s| s.interval_ms() != interval_ms) {
            bail!(
                "Series {} has interval {}ms, cache expects {}ms",
                odd.symbol(),
                odd.interval_ms(),
                interval_ms
            );
        }
        Ok(Self {
            version: SERIES_CACHE_VERSION,
            timestamp_ms: Utc::now().timestamp_millis(),
            interval_ms,
            data,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: Self = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;

        if cache.version != SERIES_CACHE_VERSION {
            bail!(
                "Cache version mismatch: file v{} vs required v{}",
                cache.version,
                SERIES_CACHE_VERSION
            );
        }

        #[cfg(debug_assertions)]
        if PRINT_SERDE {
            log::info!(
                "Cache {:?}: v{}, {} series at {}ms",
                path,
                cache.version,
                cache.data.len(),
                cache.interval_ms
            );
        }

        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn default_cache_path(interval_ms: i64) -> PathBuf {
        PathBuf::from(SERIES_PATH).join(series_cache_filename(interval_ms))
    }
}
