//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use intake_core::{FoodEntry, Metric};

/// Daily sleep, water and food tracker.
///
/// Submissions for the same day accumulate: logging sleep twice adds the
/// hours together, and food entries are appended in order.
#[derive(Debug, Parser)]
#[command(name = "intake", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show sleep, water and calorie totals for a day.
    Summary {
        #[command(flatten)]
        date: DateArg,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add hours of sleep to a day.
    Sleep {
        /// Hours slept.
        #[arg(allow_negative_numbers = true)]
        hours: f64,

        #[command(flatten)]
        date: DateArg,
    },

    /// Add millilitres of water to a day.
    Water {
        /// Millilitres drunk.
        #[arg(allow_negative_numbers = true)]
        ml: f64,

        #[command(flatten)]
        date: DateArg,
    },

    /// Append food entries to a day.
    Food {
        /// Entries as LABEL:CALORIES (e.g. "toast:120"). The label may be empty.
        #[arg(required = true, value_parser = parse_food_entry)]
        entries: Vec<FoodEntry>,

        #[command(flatten)]
        date: DateArg,
    },

    /// List a day's entries that can be removed.
    Entries {
        #[command(flatten)]
        date: DateArg,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Remove entries from a day.
    Remove(RemoveArgs),

    /// Chart every metric that has data.
    Plot {
        /// Only chart this metric (sleep, water or calories).
        #[arg(long)]
        metric: Option<Metric>,

        /// Output series as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Selects the day a command applies to.
#[derive(Debug, Clone, Default, Args)]
pub struct DateArg {
    /// Day to use: YYYY-MM-DD, today, yesterday, or "N days ago" [default: today].
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `intake remove`.
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Remove the day's sleep.
    #[arg(long)]
    pub sleep: bool,

    /// Remove the day's water.
    #[arg(long)]
    pub water: bool,

    /// Remove the food entry at this index (see `intake entries`). Repeatable.
    #[arg(long = "food", value_name = "INDEX")]
    pub food: Vec<usize>,

    #[command(flatten)]
    pub date: DateArg,
}

/// Parses `LABEL:CALORIES`, splitting on the last colon.
fn parse_food_entry(s: &str) -> Result<FoodEntry, String> {
    let (label, calories) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected LABEL:CALORIES, got '{s}'"))?;
    let calories: f64 = calories
        .trim()
        .parse()
        .map_err(|_| format!("invalid calories '{calories}' in '{s}'"))?;
    Ok(FoodEntry::new(label.trim(), calories))
}
