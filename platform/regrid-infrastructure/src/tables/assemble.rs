use chrono::NaiveDateTime;
use regrid_domain::entities::table::{Column, Dataset, TrendTable};
use regrid_domain::repositories::table_source::{LoadReport, LoadedDataset};
use regrid_domain::value_objects::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

/// Collects parsed rows of one dataset, sorting them by time and keeping
/// the last row for repeated timestamps.
pub(crate) struct TableAssembler {
    name: String,
    columns: Vec<String>,
    rows: BTreeMap<NaiveDateTime, Vec<Cell>>,
    last_ts: Option<NaiveDateTime>,
    report: LoadReport,
}

impl TableAssembler {
    pub(crate) fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: BTreeMap::new(),
            last_ts: None,
            report: LoadReport::default(),
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.columns.len()
    }

    /// Classifies one raw field, counting blanks and non-numeric text.
    pub(crate) fn classify(&mut self, raw: &str) -> Cell {
        if raw.trim().is_empty() {
            self.report.missing_cells += 1;
            return Cell::Invalid;
        }
        let cell = Cell::parse(raw);
        if !cell.is_valid() {
            self.report.invalid_cells += 1;
        }
        cell
    }

    #[cfg_attr(not(feature = "excel"), allow(dead_code))]
    pub(crate) fn count_missing(&mut self, cells: usize) {
        self.report.missing_cells += cells;
    }

    #[cfg_attr(not(feature = "excel"), allow(dead_code))]
    pub(crate) fn count_invalid(&mut self, cells: usize) {
        self.report.invalid_cells += cells;
    }

    pub(crate) fn push(&mut self, ts: NaiveDateTime, mut cells: Vec<Cell>) {
        let width = self.width();
        if cells.len() < width {
            self.report.missing_cells += width - cells.len();
        }
        cells.resize(width, Cell::Invalid);

        if self.last_ts.is_some_and(|prev| ts < prev) {
            self.report.out_of_order += 1;
        }
        self.last_ts = Some(ts);
        if self.rows.insert(ts, cells).is_some() {
            self.report.duplicates += 1;
        }
    }

    pub(crate) fn finish(self) -> Result<LoadedDataset, String> {
        let Self {
            name,
            columns,
            rows,
            mut report,
            ..
        } = self;
        if rows.is_empty() {
            return Err(format!("dataset {name} has no data rows"));
        }

        report.rows = rows.len();
        report.first_timestamp = rows.keys().next().copied();
        report.last_timestamp = rows.keys().next_back().copied();

        let mut index = Vec::with_capacity(rows.len());
        let mut cells: Vec<Vec<Cell>> = columns
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for (ts, row) in rows {
            index.push(ts);
            for (slot, cell) in cells.iter_mut().zip(row) {
                slot.push(cell);
            }
        }
        let columns = columns
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();
        let table = TrendTable::new(index, columns).map_err(|err| format!("{name}: {err}"))?;

        Ok(LoadedDataset {
            dataset: Dataset { name, table },
            report,
        })
    }
}

/// Names the value columns: the header text when present, `Column N` when
/// blank, with `.1`, `.2` suffixes on repeats.
pub(crate) fn column_names<'a>(headers: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    headers
        .enumerate()
        .map(|(idx, header)| {
            let base = match header.map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => format!("Column {}", idx + 1),
            };
            let mut name = base.clone();
            let mut k = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{k}");
                k += 1;
            }
            name
        })
        .collect()
}
