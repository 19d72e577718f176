use chrono::TimeDelta;

pub const DEFAULT_INTERVAL_SECONDS: f64 = 600.0;

/// Grid spacing, stored at millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    millis: i64,
}

impl Interval {
    pub fn from_seconds(seconds: f64) -> Result<Self, String> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(format!("interval must be a positive number of seconds, got {seconds}"));
        }
        let millis = (seconds * 1000.0).round();
        if millis < 1.0 || millis > i64::MAX as f64 {
            return Err(format!("interval out of range: {seconds}s"));
        }
        Ok(Self {
            millis: millis as i64,
        })
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        Self::from_seconds(parse_duration_like_seconds(value)?)
    }

    pub fn millis(self) -> i64 {
        self.millis
    }

    pub fn seconds(self) -> f64 {
        self.millis as f64 / 1000.0
    }

    /// `self * steps` as a chrono delta, `None` on overflow.
    pub fn times(self, steps: i64) -> Option<TimeDelta> {
        self.millis
            .checked_mul(steps)
            .and_then(TimeDelta::try_milliseconds)
    }
}

/// Accepts plain seconds (`600`, `0.5`) or a number with a unit suffix
/// (`10m`, `10min`, `2h`, `1hour`, `1d`, `1day`, `1w`, `1week`).
pub fn parse_duration_like_seconds(value: &str) -> Result<f64, String> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(seconds) = trimmed.parse::<f64>() {
        return Ok(seconds);
    }

    let (number_part, unit) = if let Some(stripped) = trimmed.strip_suffix("min") {
        (stripped, "min")
    } else if let Some(stripped) = trimmed.strip_suffix("hour") {
        (stripped, "hour")
    } else if let Some(stripped) = trimmed.strip_suffix("day") {
        (stripped, "day")
    } else if let Some(stripped) = trimmed.strip_suffix("week") {
        (stripped, "week")
    } else {
        let (number_part, unit) = trimmed.split_at(trimmed.len().saturating_sub(1));
        (number_part, unit)
    };

    let multiplier = match unit {
        "s" => 1.0,
        "m" | "min" => 60.0,
        "h" | "hour" => 3600.0,
        "d" | "day" => 86400.0,
        "w" | "week" => 604800.0,
        _ => return Err(format!("unsupported duration unit: {unit}")),
    };

    let number: f64 = number_part
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {value}"))?;
    Ok(number * multiplier)
}
