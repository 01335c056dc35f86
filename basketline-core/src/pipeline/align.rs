//! Series alignment: reindex a raw series onto the calendar with bounded
//! forward-fill.
//!
//! Short gaps (suspensions, provider holes) are bridged by carrying the most
//! recent real value forward; a gap longer than `max_fill_gap` calendar days
//! indicates genuinely stale data and stays absent. No backward fill.

use crate::domain::{AlignedSeries, Calendar, RawSeries};

/// Reindex `raw` onto `calendar`.
///
/// For each calendar day in order: an exact price is used as-is; otherwise
/// the most recent real value is carried forward if it is at most
/// `max_fill_gap` calendar days behind; otherwise the day is absent.
/// Pure and deterministic: identical inputs produce identical output.
pub fn align(raw: &RawSeries, calendar: &Calendar, max_fill_gap: u32) -> AlignedSeries {
    let points = raw.points();
    let mut values = Vec::with_capacity(calendar.len());
    let mut next = 0;
    let mut last_real: Option<(chrono::NaiveDate, f64)> = None;

    for &day in calendar.days() {
        // Advance past raw points before this day; they become the
        // fill candidate even when they fall between calendar days.
        while next < points.len() && points[next].date < day {
            last_real = Some((points[next].date, points[next].price));
            next += 1;
        }

        if next < points.len() && points[next].date == day {
            last_real = Some((day, points[next].price));
            values.push(Some(points[next].price));
            next += 1;
        } else {
            let filled = last_real.and_then(|(date, price)| {
                if (day - date).num_days() <= i64::from(max_fill_gap) {
                    Some(price)
                } else {
                    None
                }
            });
            values.push(filled);
        }
    }

    AlignedSeries::new(values)
}
