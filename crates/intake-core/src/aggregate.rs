//! Cross-date series for charting.

use chrono::NaiveDate;
use serde::Serialize;

use crate::metric::Metric;
use crate::store::Store;

/// One point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Date-ordered values of one metric, one point per stored date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub metric: Metric,
    pub points: Vec<DataPoint>,
}

impl Series {
    /// True iff the values sum to more than zero.
    ///
    /// Values are non-negative, so this is false exactly when every point
    /// is zero or the series is empty.
    pub fn has_non_zero_data(&self) -> bool {
        self.total() > 0.0
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Largest value in the series, or zero when empty.
    pub fn max(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

/// Builds the series for `metric` over every date in the store, sorted
/// ascending by date.
///
/// Absent fields count as zero, and calories are the per-day total.
pub fn series(store: &Store, metric: Metric) -> Series {
    let mut points: Vec<DataPoint> = store
        .iter()
        .map(|(date, record)| {
            let value = match metric {
                Metric::Sleep => record.sleep_hours.unwrap_or(0.0),
                Metric::Water => record.water_ml.unwrap_or(0.0),
                Metric::Calories => record.calorie_total(),
            };
            DataPoint { date, value }
        })
        .collect();
    // Store iteration is already date-ordered; keep the guarantee local.
    points.sort_by_key(|p| p.date);

    Series { metric, points }
}

/// Series for every metric that has data worth charting, in
/// [`Metric::ALL`] order.
pub fn chartable_series(store: &Store) -> Vec<Series> {
    Metric::ALL
        .into_iter()
        .map(|metric| series(store, metric))
        .filter(Series::has_non_zero_data)
        .collect()
}
