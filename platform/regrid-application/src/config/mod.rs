use regrid_domain::value_objects::resample_config::{InitialValuePolicy, ResampleMode};
use regrid_domain::value_objects::time_unit::OutputTimeUnit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub resample: ResampleSection,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub path: String,
    pub header_row: Option<usize>,
    pub time_format: Option<String>,
    pub sheets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: String,
    pub separator: Option<String>,
    pub time_format: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResampleSection {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub interval_seconds: Option<f64>,
    pub mode: Option<ResampleMode>,
    pub initial_value_policy: Option<InitialValuePolicy>,
    pub output_time_unit: Option<OutputTimeUnit>,
}

pub fn load_config(path: &Path) -> Result<JobConfig, String> {
    let (config, _source) = load_config_with_source(path)?;
    Ok(config)
}

pub fn load_config_with_source(path: &Path) -> Result<(JobConfig, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    Ok((config, contents))
}

pub fn to_toml_pretty(config: &JobConfig) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}
