//! Plot command: text charts of each metric across dates.

use std::io::Write;

use anyhow::Result;
use intake_core::{Metric, Series};
use intake_store::Tracker;

use super::util::format_value;

/// Width of a full bar in cells.
const BAR_WIDTH: usize = 10;

pub fn run<W: Write>(
    writer: &mut W,
    tracker: &Tracker,
    metric: Option<Metric>,
    json: bool,
) -> Result<()> {
    let charts: Vec<Series> = match metric {
        Some(metric) => Some(tracker.series(metric))
            .filter(Series::has_non_zero_data)
            .into_iter()
            .collect(),
        None => tracker.chartable_series(),
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&charts)?)?;
        return Ok(());
    }

    if charts.is_empty() {
        writeln!(writer, "No data to plot")?;
        return Ok(());
    }

    for (i, series) in charts.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write_chart(writer, series)?;
    }
    Ok(())
}

fn title(metric: Metric) -> &'static str {
    match metric {
        Metric::Sleep => "Sleep",
        Metric::Water => "Water intake",
        Metric::Calories => "Calories",
    }
}

/// Writes one row per date, oldest first.
fn write_chart<W: Write>(writer: &mut W, series: &Series) -> Result<()> {
    writeln!(writer, "{} ({})", title(series.metric), series.metric.unit())?;
    let max = series.max();
    for point in &series.points {
        writeln!(
            writer,
            "  {}  {}  {}",
            point.date,
            bar(point.value, max),
            format_value(point.value)
        )?;
    }
    Ok(())
}

/// Generates a fixed-width bar scaled against `max`.
/// Non-zero values below 5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░".repeat(BAR_WIDTH);
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 && value > 0.0 {
        1
    } else {
        (ratio * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
