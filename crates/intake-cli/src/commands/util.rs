//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::cli::DateArg;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative date parsing (~1000 years in days).
const MAX_RELATIVE_DAYS: u64 = 1000 * 365;

/// Parse a date string as ISO 8601, a keyword, or a relative date.
///
/// Supports:
/// - ISO 8601: "2026-01-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
///
/// Keywords and relative dates are resolved against `today`.
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();
    match s {
        "today" => return Ok(today),
        "yesterday" => {
            return today
                .checked_sub_days(Days::new(1))
                .context("date out of range");
        }
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2026-01-15), today, yesterday, or relative (e.g., '3 days ago')"
        );
    };

    let n: u64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;

    let days_per_unit = match &caps[2] {
        "day" => 1,
        "week" => 7,
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date value too large: {n} {}", &caps[2]);
    }

    today
        .checked_sub_days(Days::new(n * days_per_unit))
        .context("date out of range")
}

impl DateArg {
    /// The selected day, defaulting to `today`.
    pub fn resolve(&self, today: NaiveDate) -> anyhow::Result<NaiveDate> {
        self.date
            .as_deref()
            .map_or(Ok(today), |s| parse_date(s, today))
    }
}

/// Formats a quantity without float noise: at most two decimals, no trailing zeros.
pub fn format_value(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_date("2024-02-29", today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse_date("today", today()).unwrap(), today());
        assert_eq!(
            parse_date("yesterday", today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn parses_relative_dates() {
        assert_eq!(
            parse_date("3 days ago", today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
        );
        assert_eq!(
            parse_date("1 week ago", today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
        );
        assert_eq!(parse_date("0 days ago", today()).unwrap(), today());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date("next tuesday", today()).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(parse_date("2024-02-30", today()).is_err());
    }

    #[test]
    fn rejects_huge_relative_values() {
        let err = parse_date("999999999 weeks ago", today()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn date_arg_defaults_to_today() {
        assert_eq!(DateArg::default().resolve(today()).unwrap(), today());
        let arg = DateArg {
            date: Some("2024-01-01".to_string()),
        };
        assert_eq!(
            arg.resolve(today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn format_value_trims_noise() {
        assert_eq!(format_value(8.0), "8");
        assert_eq!(format_value(7.5), "7.5");
        assert_eq!(format_value(0.1 + 0.2), "0.3");
        assert_eq!(format_value(1250.0), "1250");
        assert_eq!(format_value(0.0), "0");
    }
}
