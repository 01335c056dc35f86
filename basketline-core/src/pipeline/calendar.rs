//! Trading-calendar derivation.
//!
//! The target market's holiday schedule is not independently known, so one
//! liquid, always-traded reference instrument serves as the oracle for
//! "this market was open on day D": its observed dates are the calendar.

use super::PipelineError;
use crate::data::PriceStore;
use crate::domain::Calendar;
use chrono::NaiveDate;

/// Build the canonical trading calendar from the reference symbol's history.
///
/// An empty reference series is fatal: no alignment is possible without a
/// calendar, and an all-empty chart would mask the real failure.
pub fn build_calendar(
    store: &PriceStore,
    reference_symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Calendar, PipelineError> {
    let series = store.get(reference_symbol, start, end)?;
    let calendar = Calendar::from_dates(series.iter().map(|p| p.date));

    if calendar.is_empty() {
        return Err(PipelineError::CalendarEmpty {
            symbol: reference_symbol.to_string(),
        });
    }

    Ok(calendar)
}
