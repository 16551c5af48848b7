//! Remove command for deleting selected entries from one day.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use intake_core::RemovalRequest;
use intake_store::Tracker;

use super::entries::write_entries;
use crate::RemoveArgs;

impl RemoveArgs {
    /// Builds the structured request; food indices refer to the list shown
    /// by `intake entries`.
    pub fn request(&self) -> RemovalRequest {
        RemovalRequest {
            remove_sleep: self.sleep,
            remove_water: self.water,
            food_indices: self.food.iter().copied().collect(),
        }
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker,
    date: NaiveDate,
    args: &RemoveArgs,
) -> Result<()> {
    let request = args.request();
    if request.is_empty() {
        bail!("nothing selected: pass --sleep, --water or --food <INDEX>");
    }

    let removed = tracker
        .remove_entries(date, &request)
        .with_context(|| format!("failed to remove entries for {date}"))?;

    let noun = if removed == 1 { "entry" } else { "entries" };
    writeln!(writer, "Removed {removed} {noun} from {date}.")?;
    writeln!(writer)?;
    write_entries(writer, date, &tracker.removable_entries(date))
}
