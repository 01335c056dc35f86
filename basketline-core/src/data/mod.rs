//! Data layer: provider boundary, per-symbol cache, cache-first store.

pub mod cache;
pub mod provider;
pub mod store;
pub mod yahoo;

pub use cache::{CacheStatus, CsvCache};
pub use provider::{DataError, FetchProgress, QuoteProvider, SilentProgress, StdoutProgress};
pub use store::PriceStore;
pub use yahoo::YahooProvider;
