//! Rebasing: scale each series so the reference day equals 1.0.
//!
//! Absolute prices of different-denomination instruments are not comparable
//! on one chart; dividing each series by its value at a shared reference day
//! turns them into relative-performance ratios.

use super::PipelineError;
use crate::domain::{AlignedSeries, Calendar};
use chrono::NaiveDate;

/// What the rebase stage did, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseReport {
    /// The calendar day every series was scaled against.
    pub reference_day: NaiveDate,
    /// Symbols rebased.
    pub rebased: Vec<String>,
    /// Symbols with no value at the reference day, passed through unrebased.
    pub passed_through: Vec<String>,
}

/// Rebase a set of aligned series in place.
///
/// The reference day is the latest calendar day at or before `anchor` on
/// which at least `quorum` of the series have a present value; candidates
/// are scanned backward from the anchor. With no such day the stage fails
/// with `QuorumNotMet` — rebasing against an unrepresentative day would
/// silently distort every series.
///
/// A series without a value at the reference day passes through unrebased
/// and is listed in the report; dropping it would make output composition
/// depend on data quality.
pub fn rebase(
    calendar: &Calendar,
    series_set: &mut [(String, AlignedSeries)],
    anchor: NaiveDate,
    quorum: usize,
) -> Result<RebaseReport, PipelineError> {
    let reference_index = find_reference_index(calendar, series_set, anchor, quorum)
        .ok_or_else(|| {
            let present = calendar
                .index_at_or_before(anchor)
                .map(|i| count_present(series_set, i))
                .unwrap_or(0);
            PipelineError::QuorumNotMet {
                anchor,
                required: quorum,
                present,
            }
        })?;
    let reference_day = calendar.days()[reference_index];

    let mut report = RebaseReport {
        reference_day,
        rebased: Vec::new(),
        passed_through: Vec::new(),
    };

    for (symbol, series) in series_set.iter_mut() {
        match series.get(reference_index) {
            Some(base) if base > 0.0 => {
                series.scale_by(base);
                report.rebased.push(symbol.clone());
            }
            // Zero at the reference day cannot anchor a ratio; treat like
            // an absent value.
            _ => report.passed_through.push(symbol.clone()),
        }
    }

    Ok(report)
}

/// Latest calendar index at or before `anchor` where the quorum holds.
fn find_reference_index(
    calendar: &Calendar,
    series_set: &[(String, AlignedSeries)],
    anchor: NaiveDate,
    quorum: usize,
) -> Option<usize> {
    let start = calendar.index_at_or_before(anchor)?;
    (0..=start)
        .rev()
        .find(|&i| count_present(series_set, i) >= quorum)
}

fn count_present(series_set: &[(String, AlignedSeries)], index: usize) -> usize {
    series_set
        .iter()
        .filter(|(_, s)| s.get(index).is_some())
        .count()
}
