//! basketline-core — time-aligned, comparable price history for a fixed
//! basket of equities.
//!
//! The pipeline builds a canonical trading-day calendar from one reference
//! symbol, fetches (or replays from cache) each basket symbol's raw daily
//! closes, reindexes them onto the shared calendar with bounded
//! forward-fill, optionally rebases them to a common reference day, and
//! downsamples to a reduced cadence for compact chart payloads.
//!
//! - [`domain`] — value types: price points, series, calendars, baskets
//! - [`data`] — provider boundary, per-symbol CSV cache, cache-first store
//! - [`pipeline`] — calendar, align, rebase, resample, dataset builder
//! - [`config`] — TOML-loadable run configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod pipeline;

pub use config::{Cadence, ChartConfig, ConfigError, RebaseConfig};
pub use pipeline::{DatasetBuilder, OutputRecord, PipelineError};
