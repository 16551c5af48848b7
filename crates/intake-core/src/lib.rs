//! Core domain logic for the daily intake tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Daily records: sleep, water and food entries for one calendar date
//! - The store: additive merges, ordered food lists, selective removal
//! - Aggregation: date-ordered series per metric for charting
//!
//! Nothing here performs I/O. Persistence lives in `intake-store`.

mod aggregate;
pub mod metric;
mod record;
mod store;

pub use aggregate::{DataPoint, Series, chartable_series, series};
pub use metric::{Metric, UnknownMetric};
pub use record::{DailyRecord, Field, FoodEntry, InvalidValue};
pub use store::{DaySummary, RemovableEntries, RemovalRequest, Store};
