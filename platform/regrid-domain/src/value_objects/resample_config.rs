use crate::errors::ResampleError;
use crate::value_objects::interval::{Interval, DEFAULT_INTERVAL_SECONDS};
use crate::value_objects::time_unit::OutputTimeUnit;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleMode {
    /// Hold the last valid value until the next change.
    #[default]
    Step,
    /// Blend linearly between known values, extrapolate past the last one.
    Interpolate,
}

impl ResampleMode {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "step" => Ok(ResampleMode::Step),
            "interpolate" | "interpolation" | "linear" => Ok(ResampleMode::Interpolate),
            _ => Err(format!("unsupported mode: {value} (expected step | interpolate)")),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResampleMode::Step => "step",
            ResampleMode::Interpolate => "interpolate",
        }
    }
}

/// What a column is assumed to read before its first recorded change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialValuePolicy {
    #[default]
    MinOfTrend,
    FirstValue,
    Blank,
}

impl InitialValuePolicy {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "min_of_trend" | "min" => Ok(InitialValuePolicy::MinOfTrend),
            "first_value" | "first" => Ok(InitialValuePolicy::FirstValue),
            "blank" => Ok(InitialValuePolicy::Blank),
            _ => Err(format!(
                "unsupported initial value policy: {value} (expected min_of_trend | first_value | blank)"
            )),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InitialValuePolicy::MinOfTrend => "min_of_trend",
            InitialValuePolicy::FirstValue => "first_value",
            InitialValuePolicy::Blank => "blank",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResampleConfig {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub interval_seconds: f64,
    pub mode: ResampleMode,
    pub initial_value_policy: InitialValuePolicy,
    pub output_time_unit: OutputTimeUnit,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            mode: ResampleMode::default(),
            initial_value_policy: InitialValuePolicy::default(),
            output_time_unit: OutputTimeUnit::default(),
        }
    }
}

impl ResampleConfig {
    pub fn interval(&self) -> Result<Interval, ResampleError> {
        Interval::from_seconds(self.interval_seconds).map_err(ResampleError::InvalidConfiguration)
    }

    /// Checks everything that does not depend on a particular dataset.
    pub fn validate(&self) -> Result<(), ResampleError> {
        self.interval()?;
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(ResampleError::InvalidConfiguration(format!(
                    "end_time {end} is before start_time {start}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InitialValuePolicy, ResampleConfig, ResampleMode};
    use crate::errors::ResampleError;
    use crate::value_objects::time_unit::OutputTimeUnit;
    use chrono::NaiveDate;

    #[test]
    fn defaults_match_documented_options() {
        let config = ResampleConfig::default();
        assert_eq!(config.interval_seconds, 600.0);
        assert_eq!(config.mode, ResampleMode::Step);
        assert_eq!(config.initial_value_policy, InitialValuePolicy::MinOfTrend);
        assert_eq!(config.output_time_unit, OutputTimeUnit::None);
        assert!(config.start_time.is_none() && config.end_time.is_none());
    }

    #[test]
    fn validate_rejects_bad_interval_and_reversed_window() {
        let config = ResampleConfig {
            interval_seconds: 0.0,
            ..ResampleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ResampleError::InvalidConfiguration(_))
        ));

        let day = NaiveDate::from_ymd_opt(2017, 4, 11).expect("date");
        let config = ResampleConfig {
            start_time: day.and_hms_opt(12, 0, 0),
            end_time: day.and_hms_opt(11, 0, 0),
            ..ResampleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ResampleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn parse_helpers_accept_labels() {
        assert_eq!(ResampleMode::parse("Interpolate").expect("mode"), ResampleMode::Interpolate);
        assert_eq!(
            InitialValuePolicy::parse("first-value").expect("policy"),
            InitialValuePolicy::FirstValue
        );
        assert!(ResampleMode::parse("spline").is_err());
        assert!(InitialValuePolicy::parse("median").is_err());
    }
}
