//! Domain value types: price points, series, calendars, baskets.

pub mod basket;
pub mod point;
pub mod series;

pub use basket::{Basket, BasketEntry};
pub use point::{PricePoint, RawSeries};
pub use series::{AlignedSeries, Calendar};
