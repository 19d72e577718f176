mod assemble;
pub mod csv_loader;
#[cfg(feature = "excel")]
pub mod workbook;

use regrid_domain::repositories::table_source::{LoadQuery, LoadedCollection, TableSource};
use regrid_domain::value_objects::file_format::InputFormat;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemTableSource;

impl FilesystemTableSource {
    pub fn new() -> Self {
        Self
    }
}

fn record_read_metrics<T>(kind: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "regrid.infra.tables.read.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("regrid.infra.tables.read_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl TableSource for FilesystemTableSource {
    fn supports(&self, format: InputFormat) -> bool {
        match format {
            InputFormat::Csv => true,
            InputFormat::Xls | InputFormat::Xlsx => cfg!(feature = "excel"),
        }
    }

    fn load_tables(&self, query: &LoadQuery) -> Result<LoadedCollection, String> {
        let start = Instant::now();
        let result = match query.format {
            InputFormat::Csv => csv_loader::load_csv(query).map(|loaded| vec![loaded]),
            InputFormat::Xls | InputFormat::Xlsx => load_workbook(query),
        };
        record_read_metrics(query.format.label(), start, &result);
        if let Ok(loaded) = &result {
            for item in loaded {
                info!(
                    dataset = %item.dataset.name,
                    rows = item.report.rows,
                    columns = item.dataset.table.columns().len(),
                    duplicates = item.report.duplicates,
                    out_of_order = item.report.out_of_order,
                    missing_cells = item.report.missing_cells,
                    invalid_cells = item.report.invalid_cells,
                    "dataset loaded"
                );
            }
        }
        result
    }
}

#[cfg(feature = "excel")]
fn load_workbook(query: &LoadQuery) -> Result<LoadedCollection, String> {
    workbook::load_workbook(query)
}

#[cfg(not(feature = "excel"))]
fn load_workbook(query: &LoadQuery) -> Result<LoadedCollection, String> {
    Err(format!(
        "reading {} requires the `excel` feature",
        query.path.display()
    ))
}
