use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Default layout of the time column in trend exports.
pub const DEFAULT_INPUT_TIME_FORMAT: &str = "%m/%d/%y %I:%M:%S %p CST";
pub const DEFAULT_OUTPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FALLBACK_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a wall-clock timestamp, trying `preferred` first and then the
/// common ISO layouts. Offsets in RFC3339 input are dropped, not applied.
pub fn parse_timestamp(value: &str, preferred: Option<&str>) -> Result<NaiveDateTime, String> {
    let trimmed = value.trim();
    if let Some(format) = preferred {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(ts) = date.and_hms_opt(0, 0, 0) {
                return Ok(ts);
            }
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    for format in FALLBACK_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }

    Err(format!("unsupported timestamp format: {value}"))
}
