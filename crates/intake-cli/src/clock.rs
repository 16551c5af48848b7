//! Resolves "today" in the configured time zone.
//!
//! Commands call [`today_in`] once and use the returned date for every
//! "today" comparison they make.

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Current calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in(Utc::now(), tz)
}

/// Calendar date of `instant` as seen in `tz`.
pub fn date_in(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Parses an IANA time zone name such as `US/Eastern` or `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone '{name}': {e}"))
}
