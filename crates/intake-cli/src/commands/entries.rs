//! Entries command: the removal checklist for one day.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use intake_core::RemovableEntries;
use intake_store::Tracker;
use serde::Serialize;

use super::util::format_value;

/// JSON shape of the checklist.
#[derive(Debug, Serialize)]
struct EntriesJson<'a> {
    date: NaiveDate,
    has_sleep: bool,
    has_water: bool,
    #[serde(flatten)]
    entries: &'a RemovableEntries,
}

pub fn run<W: Write>(writer: &mut W, tracker: &Tracker, date: NaiveDate, json: bool) -> Result<()> {
    let entries = tracker.removable_entries(date);
    if json {
        let out = EntriesJson {
            date,
            has_sleep: entries.has_sleep(),
            has_water: entries.has_water(),
            entries: &entries,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&out)?)?;
        return Ok(());
    }
    write_entries(writer, date, &entries)
}

/// Writes one line per removable item, labelled with the `intake remove`
/// flag that selects it.
pub fn write_entries<W: Write>(
    writer: &mut W,
    date: NaiveDate,
    entries: &RemovableEntries,
) -> Result<()> {
    if entries.is_empty() {
        writeln!(writer, "No data to remove for {date}.")?;
        return Ok(());
    }

    writeln!(writer, "Entries for {date}")?;
    if let Some(hours) = entries.sleep_hours {
        writeln!(writer, "  {:<10}  Sleep of {} hours", "--sleep", format_value(hours))?;
    }
    if let Some(ml) = entries.water_ml {
        writeln!(writer, "  {:<10}  Water of {} ml", "--water", format_value(ml))?;
    }
    for (index, entry) in entries.food.iter().enumerate() {
        let label = if entry.label.is_empty() {
            "(no label)"
        } else {
            entry.label.as_str()
        };
        writeln!(
            writer,
            "  {:<10}  {label} ({} calories)",
            format!("--food {index}"),
            format_value(entry.calories)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use intake_core::FoodEntry;
    use intake_store::RecordStore;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn entries_list_every_removable_item() {
        let temp = tempfile::tempdir().unwrap();
        let mut tracker = Tracker::open(RecordStore::new(temp.path().join("intake.json"))).unwrap();
        tracker.add_sleep(day(), 8.0).unwrap();
        tracker.add_water(day(), 750.0).unwrap();
        tracker
            .add_food_entries(
                day(),
                vec![FoodEntry::new("toast", 120.0), FoodEntry::new("", 0.0)],
            )
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &tracker, day(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Entries for 2024-03-01
          --sleep     Sleep of 8 hours
          --water     Water of 750 ml
          --food 0    toast (120 calories)
          --food 1    (no label) (0 calories)
        ");
    }

    #[test]
    fn empty_day_has_nothing_to_remove() {
        let temp = tempfile::tempdir().unwrap();
        let tracker = Tracker::open(RecordStore::new(temp.path().join("intake.json"))).unwrap();

        let mut output = Vec::new();
        run(&mut output, &tracker, day(), false).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No data to remove for 2024-03-01.\n"
        );
    }

    #[test]
    fn entries_json_includes_flags_and_food() {
        let temp = tempfile::tempdir().unwrap();
        let mut tracker = Tracker::open(RecordStore::new(temp.path().join("intake.json"))).unwrap();
        tracker
            .add_food_entries(day(), vec![FoodEntry::new("pear", 57.0)])
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &tracker, day(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["has_sleep"], false);
        assert_eq!(value["has_water"], false);
        assert_eq!(value["food"][0]["label"], "pear");
        assert_eq!(value["food"][0]["calories"], 57.0);
    }
}
