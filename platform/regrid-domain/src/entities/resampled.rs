use crate::value_objects::cell::Cell;
use crate::value_objects::time_unit::OutputTimeUnit;
use chrono::NaiveDateTime;

/// Row labels of a resampled table.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeAxis {
    Timestamps(Vec<NaiveDateTime>),
    /// Elapsed time since `origin`, expressed in `unit`.
    Offsets {
        unit: OutputTimeUnit,
        origin: NaiveDateTime,
        values: Vec<f64>,
    },
}

impl TimeAxis {
    pub fn len(&self) -> usize {
        match self {
            TimeAxis::Timestamps(ts) => ts.len(),
            TimeAxis::Offsets { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unit(&self) -> OutputTimeUnit {
        match self {
            TimeAxis::Timestamps(_) => OutputTimeUnit::None,
            TimeAxis::Offsets { unit, .. } => *unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResampledColumn {
    pub name: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResampledTable {
    pub axis: TimeAxis,
    pub columns: Vec<ResampledColumn>,
}

impl ResampledTable {
    pub fn column(&self, name: &str) -> Option<&ResampledColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn rows(&self) -> usize {
        self.axis.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResampledDataset {
    pub name: String,
    pub table: ResampledTable,
}
