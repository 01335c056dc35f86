//! Calendar and AlignedSeries — the shared date axis and series aligned to it.

use chrono::NaiveDate;

/// The canonical trading-day axis for a run: distinct days, strictly
/// increasing. Derived once per run from the reference symbol's observed
/// history and shared read-only across all symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Calendar {
    days: Vec<NaiveDate>,
}

impl Calendar {
    /// Build a calendar from observed dates: sorted, deduplicated.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut days: Vec<NaiveDate> = dates.into_iter().collect();
        days.sort();
        days.dedup();
        Self { days }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Index of the latest calendar day at or before `date`, if any.
    pub fn index_at_or_before(&self, date: NaiveDate) -> Option<usize> {
        match self.days.partition_point(|&d| d <= date) {
            0 => None,
            n => Some(n - 1),
        }
    }
}

/// One symbol's series reindexed onto the calendar: `values[i]` is the
/// price on `calendar.days()[i]`, or `None` where no value applies.
///
/// Recomputed every run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    values: Vec<Option<f64>>,
}

impl AlignedSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// True when no calendar day has a value.
    pub fn is_all_absent(&self) -> bool {
        self.values.iter().all(|v| v.is_none())
    }

    /// Number of days with a present value.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Divide every present value by `base`. Used by the rebase stage.
    pub fn scale_by(&mut self, base: f64) {
        for v in self.values.iter_mut() {
            if let Some(price) = v {
                *price /= base;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn calendar_sorts_and_dedupes() {
        let cal = Calendar::from_dates(vec![
            d("2024-07-03"),
            d("2024-07-01"),
            d("2024-07-03"),
            d("2024-07-02"),
        ]);
        assert_eq!(cal.days(), &[d("2024-07-01"), d("2024-07-02"), d("2024-07-03")]);
    }

    #[test]
    fn index_at_or_before_finds_latest() {
        let cal = Calendar::from_dates(vec![d("2024-07-01"), d("2024-07-03"), d("2024-07-05")]);

        assert_eq!(cal.index_at_or_before(d("2024-07-04")), Some(1));
        assert_eq!(cal.index_at_or_before(d("2024-07-05")), Some(2));
        assert_eq!(cal.index_at_or_before(d("2024-06-30")), None);
    }

    #[test]
    fn aligned_series_present_count() {
        let series = AlignedSeries::new(vec![Some(1.0), None, Some(2.0)]);
        assert_eq!(series.present_count(), 2);
        assert!(!series.is_all_absent());
        assert!(AlignedSeries::new(vec![None, None]).is_all_absent());
    }

    #[test]
    fn scale_by_leaves_absent_days_absent() {
        let mut series = AlignedSeries::new(vec![Some(4.0), None, Some(2.0)]);
        series.scale_by(2.0);
        assert_eq!(series.values(), &[Some(2.0), None, Some(1.0)]);
    }
}
