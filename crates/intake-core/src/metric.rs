//! Chartable metrics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A metric that can be aggregated across dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Sleep,
    Water,
    Calories,
}

impl Metric {
    /// Display order used when rendering every chart at once.
    pub const ALL: [Self; 3] = [Self::Water, Self::Sleep, Self::Calories];

    /// Unit suffix for rendered values.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Sleep => "h",
            Self::Water => "ml",
            Self::Calories => "kcal",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sleep => "sleep",
            Self::Water => "water",
            Self::Calories => "calories",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sleep" => Ok(Self::Sleep),
            "water" => Ok(Self::Water),
            "calories" | "food" => Ok(Self::Calories),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown metric names.
#[derive(Debug, Clone)]
pub struct UnknownMetric(String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric: {} (expected sleep, water or calories)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMetric {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names() {
        for metric in Metric::ALL {
            let parsed: Metric = metric.to_string().parse().expect("should parse");
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn food_is_an_alias_for_calories() {
        let metric: Metric = "food".parse().expect("should parse");
        assert_eq!(metric, Metric::Calories);
    }

    #[test]
    fn unknown_metric_errors() {
        let err = "steps".parse::<Metric>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown metric: steps (expected sleep, water or calories)"
        );
    }
}
