//! Dataset builder — orchestrates the alignment pipeline per basket symbol.
//!
//! Stage order: calendar → (store → align) per symbol → optional rebase →
//! resample → output records. Basket iteration order is output order. One
//! symbol failing to fetch degrades to an empty-price record; it never
//! fails the run.

use super::{align, build_calendar, rebase, resample, PipelineError};
use crate::config::ChartConfig;
use crate::data::{FetchProgress, PriceStore};
use crate::domain::{AlignedSeries, PricePoint};
use serde::{Deserialize, Serialize};

/// One chart series: the externally visible output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub symbol: String,
    pub name: String,
    pub prices: Vec<PricePoint>,
}

/// Builds the chart dataset for a configured basket.
pub struct DatasetBuilder<'a> {
    store: &'a PriceStore<'a>,
    config: &'a ChartConfig,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(store: &'a PriceStore<'a>, config: &'a ChartConfig) -> Self {
        Self { store, config }
    }

    /// Run the full pipeline and return one record per basket entry, in
    /// basket order.
    pub fn build(&self, progress: &dyn FetchProgress) -> Result<Vec<OutputRecord>, PipelineError> {
        let config = self.config;
        let calendar = build_calendar(
            self.store,
            &config.reference_symbol,
            config.start,
            config.end,
        )?;

        // Fetch-or-cache and align each symbol. A failed symbol keeps its
        // slot (None) so basket order survives into the output.
        let total = config.basket.len();
        let mut failed = 0;
        let mut aligned: Vec<Option<AlignedSeries>> = Vec::with_capacity(total);

        for (i, entry) in config.basket.entries().iter().enumerate() {
            progress.on_start(&entry.symbol, i, total);

            let result = self.store.get(&entry.symbol, config.start, config.end);
            match result {
                Ok(series) => {
                    progress.on_complete(&entry.symbol, i, total, &Ok(series.len()));
                    aligned.push(Some(align(&series, &calendar, config.max_fill_gap)));
                }
                Err(e) => {
                    eprintln!(
                        "WARNING: no data for {}: {e}; emitting empty series",
                        entry.symbol
                    );
                    progress.on_complete(&entry.symbol, i, total, &Err(e));
                    aligned.push(None);
                    failed += 1;
                }
            }
        }
        progress.on_batch_complete(total - failed, failed, total);

        if let Some(rebase_config) = &config.rebase {
            // Lift the successfully-aligned series out of their slots,
            // rebase as a set, then put them back in place.
            let mut slots = Vec::new();
            let mut set: Vec<(String, AlignedSeries)> = Vec::new();
            for (i, slot) in aligned.iter_mut().enumerate() {
                if let Some(series) = slot.take() {
                    slots.push(i);
                    set.push((config.basket.entries()[i].symbol.clone(), series));
                }
            }

            let report = rebase(&calendar, &mut set, rebase_config.anchor, rebase_config.quorum)?;
            for symbol in &report.passed_through {
                eprintln!(
                    "WARNING: {symbol} has no value at rebase reference day {}; passing through unrebased",
                    report.reference_day
                );
            }

            for (&i, (_, series)) in slots.iter().zip(set) {
                aligned[i] = Some(series);
            }
        }

        let records = config
            .basket
            .entries()
            .iter()
            .zip(aligned)
            .map(|(entry, series)| {
                let prices = series
                    .map(|s| {
                        resample(&calendar, &s, config.cadence)
                            .into_iter()
                            .map(|p| PricePoint::new(p.date, round4(p.price)))
                            .collect()
                    })
                    .unwrap_or_default();
                OutputRecord {
                    symbol: entry.symbol.clone(),
                    name: entry.name.clone(),
                    prices,
                }
            })
            .collect();

        Ok(records)
    }
}

/// Round to 4 decimal places for the output payload.
fn round4(price: f64) -> f64 {
    (price * 10_000.0).round() / 10_000.0
}
