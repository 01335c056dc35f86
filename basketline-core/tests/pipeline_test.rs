//! End-to-end pipeline tests against a mock provider and a temp cache.

use basketline_core::config::{Cadence, ChartConfig, RebaseConfig};
use basketline_core::data::{CsvCache, DataError, PriceStore, QuoteProvider, SilentProgress};
use basketline_core::domain::{Basket, BasketEntry, PricePoint};
use basketline_core::pipeline::{DatasetBuilder, PipelineError};
use chrono::NaiveDate;
use std::collections::HashMap;
use tempfile::TempDir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Provider serving canned per-symbol series; unknown symbols error.
struct MapProvider {
    series: HashMap<String, Vec<PricePoint>>,
}

impl MapProvider {
    fn new() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    fn with(mut self, symbol: &str, points: &[(&str, f64)]) -> Self {
        self.series.insert(
            symbol.to_string(),
            points
                .iter()
                .map(|&(date, price)| PricePoint::new(d(date), price))
                .collect(),
        );
        self
    }
}

impl QuoteProvider for MapProvider {
    fn name(&self) -> &str {
        "map"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PricePoint>, DataError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}

fn basket(entries: &[(&str, &str)]) -> Basket {
    Basket::new(
        entries
            .iter()
            .map(|&(symbol, name)| BasketEntry {
                symbol: symbol.into(),
                name: name.into(),
            })
            .collect(),
    )
}

fn config(basket: Basket, rebase: Option<RebaseConfig>, cadence: Cadence) -> ChartConfig {
    ChartConfig {
        basket,
        start: d("2024-07-01"),
        end: d("2024-07-31"),
        reference_symbol: "REF".into(),
        max_fill_gap: 1,
        cadence,
        rebase,
    }
}

/// Five consecutive sessions, the reference trades on all of them.
fn reference_week() -> Vec<(&'static str, f64)> {
    vec![
        ("2024-07-01", 10.0),
        ("2024-07-02", 10.0),
        ("2024-07-03", 10.0),
        ("2024-07-04", 10.0),
        ("2024-07-05", 10.0),
    ]
}

#[test]
fn aligns_fills_and_preserves_basket_order() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &reference_week())
        .with(
            "A",
            &[("2024-07-01", 1.0), ("2024-07-03", 3.0), ("2024-07-05", 5.0)],
        )
        .with("B", &[]);
    let store = PriceStore::new(&cache, &provider);

    let config = config(basket(&[("A", "Alpha"), ("B", "Beta")]), None, Cadence::Daily);
    let records = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].symbol, "A");
    assert_eq!(records[0].name, "Alpha");
    assert_eq!(records[1].symbol, "B");
    assert_eq!(records[1].name, "Beta");

    // A on the 5-day calendar with gap 1: 07-02 filled from 07-01,
    // 07-04 absent (2 days behind 07-03).
    assert_eq!(
        records[0].prices,
        vec![
            PricePoint::new(d("2024-07-01"), 1.0),
            PricePoint::new(d("2024-07-02"), 1.0),
            PricePoint::new(d("2024-07-03"), 3.0),
            PricePoint::new(d("2024-07-05"), 5.0),
        ]
    );

    // Empty provider series degrades to an empty record, not an error.
    assert!(records[1].prices.is_empty());
}

#[test]
fn failed_symbol_degrades_to_empty_record() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &reference_week())
        .with("A", &[("2024-07-01", 1.0)]);
    let store = PriceStore::new(&cache, &provider);

    // "GHOST" is not known to the provider.
    let config = config(
        basket(&[("A", "Alpha"), ("GHOST", "Ghost")]),
        None,
        Cadence::Daily,
    );
    let records = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap();

    assert_eq!(records.len(), 2);
    assert!(!records[0].prices.is_empty());
    assert_eq!(records[1].symbol, "GHOST");
    assert!(records[1].prices.is_empty());
}

#[test]
fn empty_reference_calendar_is_fatal() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &[])
        .with("A", &[("2024-07-01", 1.0)]);
    let store = PriceStore::new(&cache, &provider);

    let config = config(basket(&[("A", "Alpha")]), None, Cadence::Daily);
    let err = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap_err();

    assert!(matches!(err, PipelineError::CalendarEmpty { .. }));
}

#[test]
fn rebased_values_are_ratios_of_reference_day() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &reference_week())
        .with("A", &[("2024-07-01", 2.0), ("2024-07-02", 3.0)])
        .with("B", &[("2024-07-01", 10.0), ("2024-07-02", 5.0)]);
    let store = PriceStore::new(&cache, &provider);

    let config = config(
        basket(&[("A", "Alpha"), ("B", "Beta")]),
        Some(RebaseConfig {
            anchor: d("2024-07-01"),
            quorum: 2,
        }),
        Cadence::Daily,
    );
    let records = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap();

    assert_eq!(records[0].prices[0], PricePoint::new(d("2024-07-01"), 1.0));
    assert_eq!(records[0].prices[1], PricePoint::new(d("2024-07-02"), 1.5));
    assert_eq!(records[1].prices[0], PricePoint::new(d("2024-07-01"), 1.0));
    assert_eq!(records[1].prices[1], PricePoint::new(d("2024-07-02"), 0.5));
}

#[test]
fn quorum_not_met_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &reference_week())
        .with("A", &[("2024-07-01", 2.0)])
        .with("B", &[]);
    let store = PriceStore::new(&cache, &provider);

    let config = config(
        basket(&[("A", "Alpha"), ("B", "Beta")]),
        Some(RebaseConfig {
            anchor: d("2024-07-01"),
            quorum: 2,
        }),
        Cadence::Daily,
    );
    let err = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap_err();

    assert!(matches!(err, PipelineError::QuorumNotMet { .. }));
}

#[test]
fn symbol_missing_at_reference_day_passes_through_unrebased() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &reference_week())
        .with("A", &[("2024-07-01", 2.0), ("2024-07-02", 4.0)])
        // B starts trading a day late; with gap 1 and no backward fill it
        // has nothing on the reference day.
        .with("B", &[("2024-07-02", 7.0)]);
    let store = PriceStore::new(&cache, &provider);

    let config = config(
        basket(&[("A", "Alpha"), ("B", "Beta")]),
        Some(RebaseConfig {
            anchor: d("2024-07-01"),
            quorum: 1,
        }),
        Cadence::Daily,
    );
    let records = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap();

    // A is rebased, B keeps its absolute prices (including the filled day).
    assert_eq!(records[0].prices[0].price, 1.0);
    assert_eq!(
        records[1].prices,
        vec![
            PricePoint::new(d("2024-07-02"), 7.0),
            PricePoint::new(d("2024-07-03"), 7.0),
        ]
    );
}

#[test]
fn weekly_cadence_reduces_payload() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with(
            "REF",
            &[
                ("2024-07-01", 10.0),
                ("2024-07-03", 10.0),
                ("2024-07-05", 10.0),
                ("2024-07-08", 10.0),
            ],
        )
        .with(
            "A",
            &[
                ("2024-07-01", 1.0),
                ("2024-07-03", 2.0),
                ("2024-07-05", 3.0),
                ("2024-07-08", 4.0),
            ],
        );
    let store = PriceStore::new(&cache, &provider);

    let config = config(basket(&[("A", "Alpha")]), None, Cadence::Weekly);
    let records = DatasetBuilder::new(&store, &config)
        .build(&SilentProgress)
        .unwrap();

    assert_eq!(
        records[0].prices,
        vec![
            PricePoint::new(d("2024-07-05"), 3.0),
            PricePoint::new(d("2024-07-08"), 4.0),
        ]
    );
}

#[test]
fn repeated_runs_produce_byte_identical_output() {
    let dir = TempDir::new().unwrap();
    let cache = CsvCache::new(dir.path());
    let provider = MapProvider::new()
        .with("REF", &reference_week())
        .with("A", &[("2024-07-01", 1.2345), ("2024-07-04", 2.3456)]);
    let store = PriceStore::new(&cache, &provider);

    let config = config(basket(&[("A", "Alpha")]), None, Cadence::Weekly);
    let builder = DatasetBuilder::new(&store, &config);

    // Second run replays everything from the cache.
    let first = serde_json::to_vec(&builder.build(&SilentProgress).unwrap()).unwrap();
    let second = serde_json::to_vec(&builder.build(&SilentProgress).unwrap()).unwrap();

    assert_eq!(first, second);
}
