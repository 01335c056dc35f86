//! PricePoint and RawSeries — the fundamental price data units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily closing price for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// A usable price is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}

/// An ordered daily price series for one symbol.
///
/// Invariant: dates are strictly increasing, no duplicates, every price
/// finite and non-negative. The invariant is established on construction —
/// `from_points` drops invalid prices, sorts, and dedupes (keeping the
/// first occurrence of a duplicate date) — so holders of a `RawSeries`
/// never need to re-validate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSeries {
    points: Vec<PricePoint>,
}

impl RawSeries {
    /// Build a series from untrusted provider output: drop invalid prices,
    /// sort by date, keep the first point for any duplicated date.
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points.into_iter().filter(|p| p.is_valid()).collect();
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}
