use crate::config::InputConfig;
use crate::shared::resolve_load_query;
use regrid_domain::errors::ResampleError;
use regrid_domain::repositories::table_source::TableSource;
use regrid_domain::services::data_quality::profile_table;
use serde_json::json;
use std::time::Instant;
use tracing::info_span;

/// Loads the input without resampling and reports what ingestion repaired
/// plus a per-column profile.
pub fn inspect(
    input: &InputConfig,
    expected_step_seconds: Option<f64>,
    source: &dyn TableSource,
) -> Result<serde_json::Value, ResampleError> {
    let _span = info_span!("inspect", input = %input.path).entered();

    let query = resolve_load_query(input)?;
    if !source.supports(query.format) {
        return Err(ResampleError::UnsupportedInputFormat(format!(
            ".{} (build with the `excel` feature to read workbooks)",
            query.format.label()
        )));
    }

    let started = Instant::now();
    let loaded = source.load_tables(&query).map_err(ResampleError::Load)?;
    metrics::histogram!("regrid.inspect.load_ms").record(started.elapsed().as_millis() as f64);

    let mut datasets = Vec::with_capacity(loaded.len());
    for item in &loaded {
        let profile = profile_table(&item.dataset.table, expected_step_seconds);
        metrics::gauge!("regrid.inspect.rows").set(profile.rows as f64);
        metrics::gauge!("regrid.inspect.gaps").set(profile.gaps as f64);
        metrics::gauge!("regrid.inspect.duplicates").set(item.report.duplicates as f64);
        metrics::gauge!("regrid.inspect.out_of_order").set(item.report.out_of_order as f64);
        datasets.push(json!({
            "name": item.dataset.name,
            "load": item.report,
            "profile": profile,
        }));
    }

    Ok(json!({
        "mode": "inspect",
        "input": query.path.display().to_string(),
        "format": query.format.label(),
        "expected_step_seconds": expected_step_seconds,
        "datasets": datasets,
    }))
}
