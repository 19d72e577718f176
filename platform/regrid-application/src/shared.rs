use crate::config::{InputConfig, OutputConfig, ResampleSection};
use regrid_domain::errors::ResampleError;
use regrid_domain::repositories::table_source::LoadQuery;
use regrid_domain::value_objects::file_format::InputFormat;
use regrid_domain::value_objects::interval::DEFAULT_INTERVAL_SECONDS;
use regrid_domain::value_objects::resample_config::ResampleConfig;
use regrid_domain::value_objects::timestamp::{
    parse_timestamp, DEFAULT_INPUT_TIME_FORMAT, DEFAULT_OUTPUT_TIME_FORMAT,
};
use std::path::PathBuf;

pub fn resolve_resample_config(section: &ResampleSection) -> Result<ResampleConfig, ResampleError> {
    let config = ResampleConfig {
        start_time: resolve_time(section.start_time.as_deref(), "resample.start_time")?,
        end_time: resolve_time(section.end_time.as_deref(), "resample.end_time")?,
        interval_seconds: section.interval_seconds.unwrap_or(DEFAULT_INTERVAL_SECONDS),
        mode: section.mode.unwrap_or_default(),
        initial_value_policy: section.initial_value_policy.unwrap_or_default(),
        output_time_unit: section.output_time_unit.unwrap_or_default(),
    };
    config.validate()?;
    Ok(config)
}

fn resolve_time(
    value: Option<&str>,
    field: &str,
) -> Result<Option<chrono::NaiveDateTime>, ResampleError> {
    value
        .map(|raw| {
            parse_timestamp(raw, None)
                .map_err(|err| ResampleError::InvalidConfiguration(format!("{field}: {err}")))
        })
        .transpose()
}

pub fn resolve_load_query(input: &InputConfig) -> Result<LoadQuery, ResampleError> {
    let path = PathBuf::from(&input.path);
    let format = InputFormat::from_path(&path)?;
    Ok(LoadQuery {
        path,
        format,
        header_row: input.header_row,
        time_format: Some(
            input
                .time_format
                .clone()
                .unwrap_or_else(|| DEFAULT_INPUT_TIME_FORMAT.to_string()),
        ),
        sheets: input.sheets.clone().unwrap_or_default(),
    })
}

/// Accepts a single ASCII character, or `tab` / `\t` for tab-separated output.
pub fn resolve_separator(output: &OutputConfig) -> Result<u8, ResampleError> {
    let Some(raw) = output.separator.as_deref() else {
        return Ok(b',');
    };
    match raw {
        "\t" | "\\t" | "tab" => Ok(b'\t'),
        _ if raw.len() == 1 && raw.is_ascii() => Ok(raw.as_bytes()[0]),
        _ => Err(ResampleError::InvalidConfiguration(format!(
            "output.separator must be a single ASCII character, got {raw:?}"
        ))),
    }
}

pub fn resolve_output_time_format(output: &OutputConfig) -> String {
    output
        .time_format
        .clone()
        .unwrap_or_else(|| DEFAULT_OUTPUT_TIME_FORMAT.to_string())
}

/// Datasets the load is expected to produce, known before touching the input.
pub fn expected_table_count(query: &LoadQuery) -> usize {
    match query.format {
        InputFormat::Csv => 1,
        InputFormat::Xls | InputFormat::Xlsx => query.sheets.len().max(1),
    }
}
