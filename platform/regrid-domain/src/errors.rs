use serde::Serialize;

/// Failures that abort a whole resampling request.
///
/// Data-level problems confined to a single column never surface here; they
/// are reported as [`ColumnDiagnostic`]s next to the output instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ResampleError {
    InvalidConfiguration(String),
    InvalidTable(String),
    UnsupportedInputFormat(String),
    UnsupportedOutputFormat(String),
    MultiSheetNotSupported { format: String, tables: usize },
    Load(String),
    Write(String),
}

impl ResampleError {
    /// True when the request itself was unusable, as opposed to an I/O failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ResampleError::InvalidConfiguration(_)
                | ResampleError::UnsupportedInputFormat(_)
                | ResampleError::UnsupportedOutputFormat(_)
                | ResampleError::MultiSheetNotSupported { .. }
        )
    }
}

impl std::fmt::Display for ResampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            ResampleError::InvalidTable(msg) => write!(f, "invalid table: {msg}"),
            ResampleError::UnsupportedInputFormat(ext) => {
                write!(f, "unsupported input format: {ext}")
            }
            ResampleError::UnsupportedOutputFormat(ext) => {
                write!(f, "unsupported output format: {ext}")
            }
            ResampleError::MultiSheetNotSupported { format, tables } => write!(
                f,
                "output format {format} holds a single table but {tables} datasets were requested"
            ),
            ResampleError::Load(msg) => write!(f, "load failed: {msg}"),
            ResampleError::Write(msg) => write!(f, "write failed: {msg}"),
        }
    }
}

impl std::error::Error for ResampleError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnIssue {
    /// No valid value anywhere in the source column.
    AllInvalidColumn,
    /// `min_of_trend` seeding found no numeric value inside the grid window.
    NumericCoercionFailure,
    /// Valid values exist, but all of them fall after the last grid point.
    NoValueInWindow,
    /// Interpolated cells that could not be represented (zero span, overflow).
    DegenerateCells { count: usize },
}

impl std::fmt::Display for ColumnIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnIssue::AllInvalidColumn => write!(f, "column has no valid values"),
            ColumnIssue::NumericCoercionFailure => {
                write!(f, "no numeric value in the grid window to seed min_of_trend")
            }
            ColumnIssue::NoValueInWindow => write!(f, "every valid value lies after the grid end"),
            ColumnIssue::DegenerateCells { count } => {
                write!(f, "{count} cell(s) could not be interpolated")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDiagnostic {
    pub dataset: String,
    pub column: String,
    pub issue: ColumnIssue,
}
