//! Downsampling to a reduced cadence.
//!
//! Daily resolution over a multi-month window is a large, slow-to-render
//! payload; one representative point per bucket preserves the trend shape.
//! Buckets are ISO-week cells computed from dates alone, so every symbol
//! shares the same grid regardless of where its data starts or stops.

use crate::config::Cadence;
use crate::domain::{AlignedSeries, Calendar, PricePoint};
use chrono::Datelike;

/// Reduce an aligned series to one point per cadence bucket.
///
/// The representative is the last present value in the bucket; a bucket with
/// no present value contributes no point. `Daily` keeps every present day.
pub fn resample(calendar: &Calendar, series: &AlignedSeries, cadence: Cadence) -> Vec<PricePoint> {
    match cadence {
        Cadence::Daily => calendar
            .days()
            .iter()
            .zip(series.values())
            .filter_map(|(&date, value)| value.map(|price| PricePoint::new(date, price)))
            .collect(),
        Cadence::Weekly => resample_weekly(calendar, series),
    }
}

fn resample_weekly(calendar: &Calendar, series: &AlignedSeries) -> Vec<PricePoint> {
    let mut out = Vec::new();
    let mut current_week: Option<(i32, u32)> = None;
    let mut pending: Option<PricePoint> = None;

    for (&date, value) in calendar.days().iter().zip(series.values()) {
        let week = (date.iso_week().year(), date.iso_week().week());

        if current_week != Some(week) {
            if let Some(point) = pending.take() {
                out.push(point);
            }
            current_week = Some(week);
        }

        if let Some(price) = value {
            pending = Some(PricePoint::new(date, *price));
        }
    }

    if let Some(point) = pending {
        out.push(point);
    }

    out
}
