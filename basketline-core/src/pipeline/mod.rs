//! The alignment pipeline: calendar → align → rebase → resample → dataset.

pub mod align;
pub mod calendar;
pub mod dataset;
pub mod rebase;
pub mod resample;

pub use align::align;
pub use calendar::build_calendar;
pub use dataset::{DatasetBuilder, OutputRecord};
pub use rebase::{rebase, RebaseReport};
pub use resample::resample;

use crate::data::DataError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that abort the pipeline.
///
/// Per-symbol fetch failures are not here: those degrade to empty records
/// inside the dataset builder rather than failing the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("reference symbol '{symbol}' produced an empty trading calendar")]
    CalendarEmpty { symbol: String },

    #[error(
        "rebase quorum not met: no calendar day at or before {anchor} has values \
         for {required} symbols (best candidate had {present})"
    )]
    QuorumNotMet {
        anchor: NaiveDate,
        required: usize,
        present: usize,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}
