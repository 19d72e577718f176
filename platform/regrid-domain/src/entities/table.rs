use crate::errors::ResampleError;
use crate::value_objects::cell::Cell;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// Time-of-change trend: one row per recorded change, every column sharing
/// the same strictly increasing, non-empty index.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTable {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
}

impl TrendTable {
    pub fn new(index: Vec<NaiveDateTime>, columns: Vec<Column>) -> Result<Self, ResampleError> {
        if index.is_empty() {
            return Err(ResampleError::InvalidTable("index is empty".to_string()));
        }
        if let Some(pos) = index.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ResampleError::InvalidTable(format!(
                "index is not strictly increasing at row {} ({} after {})",
                pos + 1,
                index[pos + 1],
                index[pos]
            )));
        }
        for column in &columns {
            if column.cells.len() != index.len() {
                return Err(ResampleError::InvalidTable(format!(
                    "column {} has {} cells but the index has {} rows",
                    column.name,
                    column.cells.len(),
                    index.len()
                )));
            }
        }
        Ok(Self { index, columns })
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn rows(&self) -> usize {
        self.index.len()
    }

    pub fn first_timestamp(&self) -> NaiveDateTime {
        self.index[0]
    }

    pub fn last_timestamp(&self) -> NaiveDateTime {
        self.index[self.index.len() - 1]
    }
}

/// A named input table, e.g. one worksheet or one CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub table: TrendTable,
}

/// The valid observations of one column, in time order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidSeries {
    pub times: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
    /// Source row of the first valid observation.
    pub first_row: Option<usize>,
}

impl ValidSeries {
    pub fn from_column(index: &[NaiveDateTime], column: &Column) -> Self {
        let mut series = ValidSeries::default();
        for (row, (ts, cell)) in index.iter().zip(column.cells.iter()).enumerate() {
            if let Cell::Valid(v) = *cell {
                if series.first_row.is_none() {
                    series.first_row = Some(row);
                }
                series.times.push(*ts);
                series.values.push(v);
            }
        }
        series
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of observations at or before `t`.
    pub fn count_at_or_before(&self, t: NaiveDateTime) -> usize {
        self.times.partition_point(|ts| *ts <= t)
    }

    /// Number of observations strictly before `t`.
    pub fn count_before(&self, t: NaiveDateTime) -> usize {
        self.times.partition_point(|ts| *ts < t)
    }

    pub fn min_in_window(&self, from: NaiveDateTime, to: NaiveDateTime) -> Option<f64> {
        self.times
            .iter()
            .zip(self.values.iter())
            .filter(|(ts, _)| **ts >= from && **ts <= to)
            .map(|(_, v)| *v)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))
    }
}
