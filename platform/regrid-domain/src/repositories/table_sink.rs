use crate::entities::resampled::ResampledDataset;
use crate::value_objects::file_format::OutputFormat;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest<'a> {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub tables: &'a [ResampledDataset],
    pub separator: u8,
    pub time_format: String,
}

pub trait TableSink {
    fn write_tables(&self, request: &WriteRequest<'_>) -> Result<(), String>;
}
