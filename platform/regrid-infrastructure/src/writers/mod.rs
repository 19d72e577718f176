pub mod csv_writer;
pub mod json_writer;

use chrono::NaiveDateTime;
use regrid_domain::entities::resampled::TimeAxis;
use regrid_domain::repositories::table_sink::{TableSink, WriteRequest};
use regrid_domain::value_objects::file_format::OutputFormat;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemTableSink;

impl FilesystemTableSink {
    pub fn new() -> Self {
        Self
    }
}

fn record_write_metrics(kind: &'static str, start: Instant, result: &Result<(), String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "regrid.infra.tables.write.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("regrid.infra.tables.write_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl TableSink for FilesystemTableSink {
    fn write_tables(&self, request: &WriteRequest<'_>) -> Result<(), String> {
        let start = Instant::now();
        let result = ensure_parent(&request.path).and_then(|_| match request.format {
            OutputFormat::Csv => match request.tables {
                [single] => csv_writer::write_csv(
                    &request.path,
                    &single.table,
                    request.separator,
                    &request.time_format,
                ),
                tables => Err(format!(
                    "csv output holds exactly one table, got {}",
                    tables.len()
                )),
            },
            OutputFormat::Json => {
                json_writer::write_json(&request.path, request.tables, &request.time_format)
            }
        });
        record_write_metrics(request.format.label(), start, &result);
        if result.is_ok() {
            info!(
                path = %request.path.display(),
                format = request.format.label(),
                tables = request.tables.len(),
                "output written"
            );
        }
        result
    }
}

fn ensure_parent(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|err| format!("failed to create dir {}: {}", dir.display(), err)),
        _ => Ok(()),
    }
}

/// Formats a timestamp, reporting bad format strings instead of panicking.
pub(crate) fn format_timestamp(ts: NaiveDateTime, time_format: &str) -> Result<String, String> {
    let mut out = String::new();
    write!(out, "{}", ts.format(time_format))
        .map_err(|_| format!("invalid output time format: {time_format}"))?;
    Ok(out)
}

pub(crate) fn time_labels(axis: &TimeAxis, time_format: &str) -> Result<Vec<String>, String> {
    match axis {
        TimeAxis::Timestamps(grid) => grid
            .iter()
            .map(|ts| format_timestamp(*ts, time_format))
            .collect(),
        TimeAxis::Offsets { values, .. } => Ok(values.iter().map(|v| v.to_string()).collect()),
    }
}
