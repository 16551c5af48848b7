//! Submission commands: sleep, water and food.
//!
//! Sleep and water add to whatever the day already holds. Food entries are
//! appended after the day's existing entries.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use intake_core::FoodEntry;
use intake_store::Tracker;

use super::summary::write_summary;
use super::util::format_value;

pub fn sleep<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker,
    date: NaiveDate,
    hours: f64,
) -> Result<()> {
    let summary = tracker
        .add_sleep(date, hours)
        .with_context(|| format!("failed to log sleep for {date}"))?;

    writeln!(writer, "Logged {} hours of sleep for {date}.", format_value(hours))?;
    writeln!(writer)?;
    write_summary(writer, &summary)
}

pub fn water<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker,
    date: NaiveDate,
    ml: f64,
) -> Result<()> {
    let summary = tracker
        .add_water(date, ml)
        .with_context(|| format!("failed to log water for {date}"))?;

    writeln!(writer, "Logged {} ml of water for {date}.", format_value(ml))?;
    writeln!(writer)?;
    write_summary(writer, &summary)
}

pub fn food<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker,
    date: NaiveDate,
    entries: Vec<FoodEntry>,
) -> Result<()> {
    let count = entries.len();
    let calories: f64 = entries.iter().map(|e| e.calories).sum();
    let summary = tracker
        .add_food_entries(date, entries)
        .with_context(|| format!("failed to log food for {date}"))?;

    let noun = if count == 1 { "entry" } else { "entries" };
    writeln!(
        writer,
        "Logged {count} food {noun} ({} calories) for {date}.",
        format_value(calories)
    )?;
    writeln!(writer)?;
    write_summary(writer, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use intake_store::{RecordStore, StoreError};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn open(temp: &tempfile::TempDir) -> Tracker {
        Tracker::open(RecordStore::new(temp.path().join("intake.json"))).unwrap()
    }

    #[test]
    fn sleep_accumulates_and_redraws_summary() {
        let temp = tempfile::tempdir().unwrap();
        let mut tracker = open(&temp);

        sleep(&mut Vec::new(), &mut tracker, day(), 6.0).unwrap();
        let mut output = Vec::new();
        sleep(&mut output, &mut tracker, day(), 2.0).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Logged 2 hours of sleep for 2024-03-01.

        Summary for 2024-03-01
          8 hours of sleep
          0 ml of water
          0 calories
        ");
    }

    #[test]
    fn food_appends_entries() {
        let temp = tempfile::tempdir().unwrap();
        let mut tracker = open(&temp);

        let mut output = Vec::new();
        food(
            &mut output,
            &mut tracker,
            day(),
            vec![FoodEntry::new("a", 10.0), FoodEntry::new("b", 20.0)],
        )
        .unwrap();
        food(&mut Vec::new(), &mut tracker, day(), vec![FoodEntry::new("c", 5.0)]).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Logged 2 food entries (30 calories) for 2024-03-01."));

        let labels: Vec<&str> = tracker
            .store()
            .food_entries(day())
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(tracker.summary(day()).calorie_total, 35.0);
    }

    #[test]
    fn negative_water_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let mut tracker = open(&temp);
        water(&mut Vec::new(), &mut tracker, day(), 250.0).unwrap();

        let mut output = Vec::new();
        let err = water(&mut output, &mut tracker, day(), -5.0).unwrap_err();

        assert!(err.to_string().contains("failed to log water for 2024-03-01"));
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidValue(_))
        ));
        assert!(output.is_empty());
        assert_eq!(tracker.summary(day()).water_ml, 250.0);
    }
}
