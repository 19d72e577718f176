use crate::config::JobConfig;
use crate::shared::{
    expected_table_count, resolve_load_query, resolve_output_time_format, resolve_resample_config,
    resolve_separator,
};
use regrid_domain::entities::resampled::ResampledDataset;
use regrid_domain::entities::table::Dataset;
use regrid_domain::errors::{ColumnDiagnostic, ResampleError};
use regrid_domain::repositories::table_sink::{TableSink, WriteRequest};
use regrid_domain::repositories::table_source::{LoadReport, TableSource};
use regrid_domain::services::resample::resample_table;
use regrid_domain::value_objects::file_format::OutputFormat;
use regrid_domain::value_objects::resample_config::ResampleConfig;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, info_span, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ResampledCollection {
    pub datasets: Vec<ResampledDataset>,
    pub diagnostics: Vec<ColumnDiagnostic>,
}

/// Resamples every dataset independently under one shared configuration.
pub fn resample_collection(
    datasets: &[Dataset],
    config: &ResampleConfig,
) -> Result<ResampledCollection, ResampleError> {
    let _span = info_span!(
        "resample_collection",
        datasets = datasets.len(),
        mode = config.mode.label(),
        policy = config.initial_value_policy.label(),
        interval_seconds = config.interval_seconds
    )
    .entered();

    config.validate()?;
    let mut seen = BTreeSet::new();
    for dataset in datasets {
        if !seen.insert(dataset.name.as_str()) {
            return Err(ResampleError::InvalidTable(format!(
                "duplicate dataset name: {}",
                dataset.name
            )));
        }
    }

    let started = Instant::now();
    let mut out = ResampledCollection {
        datasets: Vec::with_capacity(datasets.len()),
        diagnostics: Vec::new(),
    };
    for dataset in datasets {
        let resampled = resample_table(&dataset.name, &dataset.table, config)?;
        info!(
            dataset = %dataset.name,
            source_rows = dataset.table.rows(),
            rows = resampled.table.rows(),
            columns = resampled.table.columns.len(),
            grid_start = %resampled.grid_start,
            grid_end = %resampled.grid_end,
            "dataset resampled"
        );
        for diagnostic in &resampled.diagnostics {
            warn!(
                dataset = %diagnostic.dataset,
                column = %diagnostic.column,
                issue = %diagnostic.issue,
                "column degraded"
            );
        }
        metrics::counter!("regrid.resample.datasets").increment(1);
        metrics::counter!("regrid.resample.rows").increment(resampled.table.rows() as u64);
        metrics::counter!("regrid.resample.diagnostics")
            .increment(resampled.diagnostics.len() as u64);

        out.diagnostics.extend(resampled.diagnostics);
        out.datasets.push(ResampledDataset {
            name: dataset.name.clone(),
            table: resampled.table,
        });
    }
    metrics::histogram!("regrid.resample.duration_ms")
        .record(started.elapsed().as_millis() as f64);
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub source_rows: usize,
    pub output_rows: usize,
    pub columns: usize,
    pub load: LoadReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_format: &'static str,
    pub output_format: &'static str,
    pub mode: &'static str,
    pub initial_value_policy: &'static str,
    pub interval_seconds: f64,
    pub output_time_unit: &'static str,
    pub datasets: Vec<DatasetSummary>,
    pub warnings: Vec<ColumnDiagnostic>,
}

/// Load, resample and write one job. Every configuration check runs before
/// the input is read.
pub fn run_job(
    job: &JobConfig,
    source: &dyn TableSource,
    sink: &dyn TableSink,
) -> Result<JobReport, ResampleError> {
    let _span = info_span!("run_job", input = %job.input.path, output = %job.output.path).entered();

    let config = resolve_resample_config(&job.resample)?;
    let query = resolve_load_query(&job.input)?;
    if !source.supports(query.format) {
        return Err(ResampleError::UnsupportedInputFormat(format!(
            ".{} (build with the `excel` feature to read workbooks)",
            query.format.label()
        )));
    }
    let output_path = PathBuf::from(&job.output.path);
    let output_format = OutputFormat::from_path(&output_path)?;
    output_format.ensure_table_count(expected_table_count(&query))?;
    let separator = resolve_separator(&job.output)?;
    let time_format = resolve_output_time_format(&job.output);

    let load_start = Instant::now();
    let loaded = source.load_tables(&query).map_err(ResampleError::Load)?;
    metrics::histogram!("regrid.job.load_ms").record(load_start.elapsed().as_millis() as f64);
    output_format.ensure_table_count(loaded.len())?;

    let (datasets, reports): (Vec<Dataset>, Vec<LoadReport>) = loaded
        .into_iter()
        .map(|item| (item.dataset, item.report))
        .unzip();
    let collection = resample_collection(&datasets, &config)?;

    let write_start = Instant::now();
    sink.write_tables(&WriteRequest {
        path: output_path.clone(),
        format: output_format,
        tables: &collection.datasets,
        separator,
        time_format,
    })
    .map_err(ResampleError::Write)?;
    metrics::histogram!("regrid.job.write_ms").record(write_start.elapsed().as_millis() as f64);

    let summaries = datasets
        .iter()
        .zip(reports)
        .zip(collection.datasets.iter())
        .map(|((dataset, load), resampled)| DatasetSummary {
            name: dataset.name.clone(),
            source_rows: dataset.table.rows(),
            output_rows: resampled.table.rows(),
            columns: resampled.table.columns.len(),
            load,
        })
        .collect();

    info!(
        datasets = datasets.len(),
        warnings = collection.diagnostics.len(),
        output = %output_path.display(),
        "job complete"
    );

    Ok(JobReport {
        input: query.path,
        output: output_path,
        input_format: query.format.label(),
        output_format: output_format.label(),
        mode: config.mode.label(),
        initial_value_policy: config.initial_value_policy.label(),
        interval_seconds: config.interval_seconds,
        output_time_unit: config.output_time_unit.label(),
        datasets: summaries,
        warnings: collection.diagnostics,
    })
}
