//! CSV cache layer: one file per symbol.
//!
//! Layout: `{cache_dir}/{SYMBOL}.csv` with `date,price` columns.
//!
//! Writes are atomic (write to .tmp, rename into place). A file that fails
//! to parse is treated as a cache miss, not a fatal error — the cache is an
//! optimization over the provider, not an independent source of truth.

use super::provider::DataError;
use crate::domain::{PricePoint, RawSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One row of the cache artifact.
#[derive(Debug, Deserialize)]
struct CacheRow {
    date: NaiveDate,
    price: f64,
}

/// The per-symbol CSV cache.
pub struct CsvCache {
    cache_dir: PathBuf,
}

impl CsvCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Root directory of the cache.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the artifact for a symbol: `{cache_dir}/{SYMBOL}.csv`.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.cache_dir.join(format!("{symbol}.csv"))
    }

    /// Whether an artifact exists for this symbol.
    pub fn contains(&self, symbol: &str) -> bool {
        self.path_for(symbol).exists()
    }

    /// Persist a series for a symbol, atomically (tmp + rename).
    ///
    /// An empty series writes a header-only file: "the provider had nothing"
    /// is itself a cacheable, reproducible answer.
    pub fn write(&self, symbol: &str, series: &RawSeries) -> Result<(), DataError> {
        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| DataError::CacheError(format!("failed to create cache dir: {e}")))?;

        let path = self.path_for(symbol);
        let tmp_path = path.with_extension("csv.tmp");

        let mut writer = csv::Writer::from_path(&tmp_path)
            .map_err(|e| DataError::CacheError(format!("create {}: {e}", tmp_path.display())))?;
        // Header is written explicitly so an empty series still produces a
        // parseable artifact.
        writer
            .write_record(["date", "price"])
            .map_err(|e| DataError::CacheError(format!("write header: {e}")))?;
        for point in series.iter() {
            writer
                .write_record([
                    point.date.format("%Y-%m-%d").to_string(),
                    point.price.to_string(),
                ])
                .map_err(|e| DataError::CacheError(format!("write row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| DataError::CacheError(format!("flush: {e}")))?;
        drop(writer);

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::CacheError(format!("atomic rename failed: {e}"))
        })?;

        Ok(())
    }

    /// Load the cached series for a symbol.
    ///
    /// Returns `Ok(None)` when no artifact exists, or when one exists but
    /// fails to parse (with a warning) — the caller re-fetches either way.
    pub fn load(&self, symbol: &str) -> Result<Option<RawSeries>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Ok(None);
        }

        match read_rows(&path) {
            Ok(points) => Ok(Some(RawSeries::from_points(points))),
            Err(e) => {
                eprintln!(
                    "WARNING: treating corrupt cache file {} as a miss: {e}",
                    path.display()
                );
                Ok(None)
            }
        }
    }

    /// Coverage report for a set of symbols, used by `cache status`.
    pub fn status(&self, symbols: &[&str]) -> Vec<CacheStatus> {
        symbols
            .iter()
            .map(|sym| {
                let series = self.load(sym).ok().flatten();
                CacheStatus {
                    symbol: sym.to_string(),
                    cached: self.contains(sym),
                    first_date: series.as_ref().and_then(|s| s.first_date()),
                    last_date: series.as_ref().and_then(|s| s.last_date()),
                    point_count: series.as_ref().map(|s| s.len()),
                }
            })
            .collect()
    }

    /// Remove the artifact for a symbol, if present. Manual invalidation.
    pub fn remove(&self, symbol: &str) -> Result<(), DataError> {
        let path = self.path_for(symbol);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| DataError::CacheError(format!("remove {}: {e}", path.display())))?;
        }
        Ok(())
    }
}

/// Cache coverage for a single symbol.
#[derive(Debug, Clone)]
pub struct CacheStatus {
    pub symbol: String,
    pub cached: bool,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub point_count: Option<usize>,
}

fn read_rows(path: &Path) -> Result<Vec<PricePoint>, DataError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DataError::CacheError(format!("open: {e}")))?;

    let mut points = Vec::new();
    for row in reader.deserialize::<CacheRow>() {
        let row = row.map_err(|e| DataError::CacheError(format!("parse row: {e}")))?;
        points.push(PricePoint::new(row.date, row.price));
    }
    Ok(points)
}
