//! The in-memory store and the operations that mutate one day's record.
//!
//! A [`Store`] is the whole durable state: one [`DailyRecord`] per calendar
//! date, created lazily on the first submission for that date. All mutation
//! goes through the methods here; each one either applies completely or, on
//! [`InvalidValue`], leaves the store untouched.
//!
//! # Merge semantics
//!
//! Sleep and water submissions are additive: logging 2 hours after 6 hours
//! yields 8, not 2. Food submissions append to the day's ordered list
//! without deduplication.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{DailyRecord, Field, FoodEntry, InvalidValue, validate};

/// Mapping from calendar date to that day's metrics.
///
/// Iteration is in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    days: BTreeMap<NaiveDate, DailyRecord>,
}

/// Read-only totals for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub sleep_hours: f64,
    pub water_ml: f64,
    pub calorie_total: f64,
}

/// What can be removed from a date, for building a removal checklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemovableEntries {
    pub sleep_hours: Option<f64>,
    pub water_ml: Option<f64>,
    /// Food entries in current order; the position is the removal index.
    pub food: Vec<FoodEntry>,
}

impl RemovableEntries {
    pub const fn has_sleep(&self) -> bool {
        self.sleep_hours.is_some()
    }

    pub const fn has_water(&self) -> bool {
        self.water_ml.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_sleep() && !self.has_water() && self.food.is_empty()
    }
}

/// A structured request to remove entries from one date.
///
/// Food indices are positions in the day's food list at the moment the
/// request is applied. Indices past the end of the list are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalRequest {
    pub remove_sleep: bool,
    pub remove_water: bool,
    pub food_indices: BTreeSet<usize>,
}

impl RemovalRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sleep(mut self) -> Self {
        self.remove_sleep = true;
        self
    }

    #[must_use]
    pub fn water(mut self) -> Self {
        self.remove_water = true;
        self
    }

    #[must_use]
    pub fn food(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.food_indices.extend(indices);
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.remove_sleep && !self.remove_water && self.food_indices.is_empty()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `date`, if one was ever created.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date)
    }

    /// Number of dates with a record (including empty ones).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates over all records in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &DailyRecord)> {
        self.days.iter().map(|(date, record)| (*date, record))
    }

    pub fn sleep_hours(&self, date: NaiveDate) -> f64 {
        self.get(date).and_then(|r| r.sleep_hours).unwrap_or(0.0)
    }

    pub fn water_ml(&self, date: NaiveDate) -> f64 {
        self.get(date).and_then(|r| r.water_ml).unwrap_or(0.0)
    }

    pub fn food_entries(&self, date: NaiveDate) -> &[FoodEntry] {
        self.get(date)
            .map(|r| r.food.as_slice())
            .unwrap_or_default()
    }

    /// Sum of calories logged on `date`; zero if nothing was logged.
    pub fn daily_calorie_total(&self, date: NaiveDate) -> f64 {
        self.get(date).map_or(0.0, DailyRecord::calorie_total)
    }

    pub fn summary(&self, date: NaiveDate) -> DaySummary {
        DaySummary {
            date,
            sleep_hours: self.sleep_hours(date),
            water_ml: self.water_ml(date),
            calorie_total: self.daily_calorie_total(date),
        }
    }

    pub fn removable_entries(&self, date: NaiveDate) -> RemovableEntries {
        self.get(date)
            .map(|record| RemovableEntries {
                sleep_hours: record.sleep_hours,
                water_ml: record.water_ml,
                food: record.food.clone(),
            })
            .unwrap_or_default()
    }

    /// Adds `hours` to the sleep logged on `date`.
    ///
    /// The new total is validated too, so a sum that overflows to infinity
    /// is rejected and the record is left unchanged.
    pub fn add_sleep(&mut self, date: NaiveDate, hours: f64) -> Result<&DailyRecord, InvalidValue> {
        let hours = validate(Field::SleepHours, hours)?;
        let total = validate(Field::SleepHours, self.sleep_hours(date) + hours)?;
        let record = self.days.entry(date).or_default();
        record.sleep_hours = Some(total);
        Ok(record)
    }

    /// Adds `ml` to the water logged on `date`.
    pub fn add_water(&mut self, date: NaiveDate, ml: f64) -> Result<&DailyRecord, InvalidValue> {
        let ml = validate(Field::WaterMl, ml)?;
        let total = validate(Field::WaterMl, self.water_ml(date) + ml)?;
        let record = self.days.entry(date).or_default();
        record.water_ml = Some(total);
        Ok(record)
    }

    /// Appends `entries` to the food list for `date`, preserving order.
    ///
    /// Every entry is validated before any is appended.
    pub fn add_food_entries(
        &mut self,
        date: NaiveDate,
        entries: impl IntoIterator<Item = FoodEntry>,
    ) -> Result<&DailyRecord, InvalidValue> {
        let entries: Vec<FoodEntry> = entries.into_iter().collect();
        let mut total = self.daily_calorie_total(date);
        for entry in &entries {
            total += validate(Field::Calories, entry.calories)?;
        }
        validate(Field::Calories, total)?;
        let record = self.days.entry(date).or_default();
        record.food.extend(entries);
        Ok(record)
    }

    /// Applies `request` to `date` and returns how many items were removed.
    ///
    /// A date with no record is left alone; no record is created for it.
    pub fn remove_entries(&mut self, date: NaiveDate, request: &RemovalRequest) -> usize {
        let Some(record) = self.days.get_mut(&date) else {
            return 0;
        };

        let mut removed = 0;
        if request.remove_sleep && record.sleep_hours.take().is_some() {
            removed += 1;
        }
        if request.remove_water && record.water_ml.take().is_some() {
            removed += 1;
        }

        if !request.food_indices.is_empty() {
            let before = record.food.len();
            let ignored: Vec<usize> = request
                .food_indices
                .iter()
                .copied()
                .filter(|&i| i >= before)
                .collect();
            if !ignored.is_empty() {
                tracing::debug!(%date, ?ignored, "ignoring out-of-range food indices");
            }

            record.food = std::mem::take(&mut record.food)
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !request.food_indices.contains(i))
                .map(|(_, entry)| entry)
                .collect();
            removed += before - record.food.len();
        }

        removed
    }
}
