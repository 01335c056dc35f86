//! Chart configuration: basket, date range, and pipeline policy knobs.
//!
//! Loaded from a TOML file. Dates are written as quoted `"YYYY-MM-DD"`
//! strings and parsed during validation, so a malformed date is reported
//! with its field name instead of a serde type error.

use crate::domain::{Basket, BasketEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Output cadence of the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Keep every present calendar day.
    Daily,
    /// One representative point per ISO week.
    Weekly,
}

/// Rebase stage settings. Presence of the section enables rebasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseConfig {
    /// Reference-day search anchors at the latest calendar day <= this date.
    pub anchor: NaiveDate,
    /// Minimum number of symbols that must have a value on the reference day.
    pub quorum: usize,
}

/// Validated run configuration. Immutable; passed into the dataset builder
/// at construction — there is no process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub basket: Basket,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Liquid, always-traded instrument whose observed history defines the
    /// trading calendar.
    pub reference_symbol: String,
    /// Longest gap (in calendar days) a forward-fill may bridge.
    pub max_fill_gap: u32,
    pub cadence: Cadence,
    pub rebase: Option<RebaseConfig>,
}

// ── TOML file shape ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawConfig {
    chart: RawChart,
    rebase: Option<RawRebase>,
    basket: Vec<BasketEntry>,
}

#[derive(Debug, Deserialize)]
struct RawChart {
    start: String,
    end: Option<String>,
    reference_symbol: String,
    max_fill_gap: Option<u32>,
    cadence: Option<Cadence>,
}

#[derive(Debug, Deserialize)]
struct RawRebase {
    anchor: Option<String>,
    quorum: Option<usize>,
}

const DEFAULT_MAX_FILL_GAP: u32 = 5;

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ConfigError::Invalid(format!("{field}: expected YYYY-MM-DD, got '{value}'")))
}

impl ChartConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::from_raw(raw, chrono::Local::now().date_naive())
    }

    fn from_raw(raw: RawConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let start = parse_date("chart.start", &raw.chart.start)?;
        let end = match raw.chart.end.as_deref() {
            Some(s) => parse_date("chart.end", s)?,
            None => today,
        };

        let basket = Basket::new(raw.basket);

        let rebase = raw
            .rebase
            .map(|r| -> Result<RebaseConfig, ConfigError> {
                let anchor = match r.anchor.as_deref() {
                    Some(s) => parse_date("rebase.anchor", s)?,
                    None => start,
                };
                // Majority by default.
                let quorum = r.quorum.unwrap_or(basket.len() / 2 + 1);
                Ok(RebaseConfig { anchor, quorum })
            })
            .transpose()?;

        let config = Self {
            basket,
            start,
            end,
            reference_symbol: raw.chart.reference_symbol,
            max_fill_gap: raw.chart.max_fill_gap.unwrap_or(DEFAULT_MAX_FILL_GAP),
            cadence: raw.chart.cadence.unwrap_or(Cadence::Weekly),
            rebase,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.basket.is_empty() {
            return Err(ConfigError::Invalid("basket must not be empty".into()));
        }
        if self.start > self.end {
            return Err(ConfigError::Invalid(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        if self.reference_symbol.is_empty() {
            return Err(ConfigError::Invalid("reference_symbol must not be empty".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for symbol in self.basket.symbols() {
            if !seen.insert(symbol) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate basket symbol '{symbol}'"
                )));
            }
        }

        if let Some(rebase) = &self.rebase {
            if rebase.quorum == 0 || rebase.quorum > self.basket.len() {
                return Err(ConfigError::Invalid(format!(
                    "rebase.quorum {} out of range 1..={}",
                    rebase.quorum,
                    self.basket.len()
                )));
            }
        }

        Ok(())
    }
}
