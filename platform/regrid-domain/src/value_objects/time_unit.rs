use serde::{Deserialize, Serialize};

/// How the output index is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTimeUnit {
    /// Keep grid timestamps.
    #[default]
    None,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl OutputTimeUnit {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "none" | "" => Ok(OutputTimeUnit::None),
            "s" | "sec" | "second" | "seconds" => Ok(OutputTimeUnit::Seconds),
            "m" | "min" | "minute" | "minutes" => Ok(OutputTimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(OutputTimeUnit::Hours),
            "d" | "day" | "days" => Ok(OutputTimeUnit::Days),
            _ => Err(format!(
                "unsupported output time unit: {value} (expected none | seconds | minutes | hours | days)"
            )),
        }
    }

    pub fn seconds_per_unit(self) -> Option<f64> {
        match self {
            OutputTimeUnit::None => None,
            OutputTimeUnit::Seconds => Some(1.0),
            OutputTimeUnit::Minutes => Some(60.0),
            OutputTimeUnit::Hours => Some(3600.0),
            OutputTimeUnit::Days => Some(86400.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputTimeUnit::None => "none",
            OutputTimeUnit::Seconds => "seconds",
            OutputTimeUnit::Minutes => "minutes",
            OutputTimeUnit::Hours => "hours",
            OutputTimeUnit::Days => "days",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OutputTimeUnit;

    #[test]
    fn parse_accepts_labels_and_short_forms() {
        assert_eq!(OutputTimeUnit::parse("none").expect("none"), OutputTimeUnit::None);
        assert_eq!(OutputTimeUnit::parse("Hours").expect("hours"), OutputTimeUnit::Hours);
        assert_eq!(OutputTimeUnit::parse("d").expect("d"), OutputTimeUnit::Days);
        assert!(OutputTimeUnit::parse("fortnights").is_err());
    }

    #[test]
    fn label_round_trips_through_parse() {
        for unit in [
            OutputTimeUnit::None,
            OutputTimeUnit::Seconds,
            OutputTimeUnit::Minutes,
            OutputTimeUnit::Hours,
            OutputTimeUnit::Days,
        ] {
            assert_eq!(OutputTimeUnit::parse(unit.label()).expect("label"), unit);
        }
    }
}
