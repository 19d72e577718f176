use crate::entities::table::Dataset;
use crate::value_objects::file_format::InputFormat;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadQuery {
    pub path: PathBuf,
    pub format: InputFormat,
    /// Lines skipped before the header; `None` means the file has no header.
    pub header_row: Option<usize>,
    pub time_format: Option<String>,
    /// Workbook sheets to read; empty means the first sheet.
    pub sheets: Vec<String>,
}

/// What ingestion had to repair in one dataset.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows: usize,
    pub duplicates: usize,
    pub out_of_order: usize,
    pub missing_cells: usize,
    pub invalid_cells: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub report: LoadReport,
}

pub type LoadedCollection = Vec<LoadedDataset>;

pub trait TableSource {
    fn supports(&self, format: InputFormat) -> bool;
    fn load_tables(&self, query: &LoadQuery) -> Result<LoadedCollection, String>;
}
