use crate::errors::ResampleError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Xls,
    Xlsx,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ResampleError> {
        match extension(path).as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xls" => Ok(InputFormat::Xls),
            "xlsx" => Ok(InputFormat::Xlsx),
            other => Err(ResampleError::UnsupportedInputFormat(describe(other, path))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Xls => "xls",
            InputFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One table per file.
    Csv,
    /// A workbook document holding every named table.
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ResampleError> {
        match extension(path).as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ResampleError::UnsupportedOutputFormat(describe(other, path))),
        }
    }

    pub fn supports_multiple_tables(self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn ensure_table_count(self, tables: usize) -> Result<(), ResampleError> {
        if tables > 1 && !self.supports_multiple_tables() {
            return Err(ResampleError::MultiSheetNotSupported {
                format: self.label().to_string(),
                tables,
            });
        }
        Ok(())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn describe(ext: &str, path: &Path) -> String {
    if ext.is_empty() {
        format!("no file extension on {}", path.display())
    } else {
        format!(".{ext} ({})", path.display())
    }
}
