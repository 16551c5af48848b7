//! Summary command for showing one day's totals.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use intake_core::DaySummary;
use intake_store::Tracker;

use super::util::format_value;

pub fn run<W: Write>(writer: &mut W, tracker: &Tracker, date: NaiveDate, json: bool) -> Result<()> {
    let summary = tracker.summary(date);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }
    write_summary(writer, &summary)
}

/// Writes the human-readable totals block.
pub fn write_summary<W: Write>(writer: &mut W, summary: &DaySummary) -> Result<()> {
    writeln!(writer, "Summary for {}", summary.date)?;
    writeln!(writer, "  {} hours of sleep", format_value(summary.sleep_hours))?;
    writeln!(writer, "  {} ml of water", format_value(summary.water_ml))?;
    writeln!(writer, "  {} calories", format_value(summary.calorie_total))?;
    Ok(())
}
