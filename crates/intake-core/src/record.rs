//! Per-day metric records.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single food item logged for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Free-form label. Empty labels are accepted.
    pub label: String,
    pub calories: f64,
}

impl FoodEntry {
    pub fn new(label: impl Into<String>, calories: f64) -> Self {
        Self {
            label: label.into(),
            calories,
        }
    }
}

/// Metrics recorded for one calendar date.
///
/// `None` means the value was never entered (or was removed); every consumer
/// treats it as zero. A record with nothing in it reads back the same as a
/// date that has no record at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<f64>,

    /// Food entries in insertion order. Positions are the removal indices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food: Vec<FoodEntry>,
}

impl DailyRecord {
    /// Sum of calories over all food entries.
    pub fn calorie_total(&self) -> f64 {
        self.food.iter().map(|entry| entry.calories).sum()
    }

    /// Returns true if the record holds no data.
    pub fn is_empty(&self) -> bool {
        self.sleep_hours.is_none() && self.water_ml.is_none() && self.food.is_empty()
    }
}

/// The user-submitted quantity a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SleepHours,
    WaterMl,
    Calories,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SleepHours => "sleep hours",
            Self::WaterMl => "water ml",
            Self::Calories => "calories",
        };
        write!(f, "{s}")
    }
}

/// A submitted value was negative or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid {field}: {value} (must be a non-negative number)")]
pub struct InvalidValue {
    pub field: Field,
    pub value: f64,
}

/// Accepts `value` as given if it is finite and non-negative. Never clamps.
pub(crate) fn validate(field: Field, value: f64) -> Result<f64, InvalidValue> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidValue { field, value })
    }
}
