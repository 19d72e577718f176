use crate::entities::table::{TrendTable, ValidSeries};
use crate::services::time_axis::seconds_between;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub valid: usize,
    pub invalid: usize,
    pub first_valid: Option<NaiveDateTime>,
    pub last_valid: Option<NaiveDateTime>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub rows: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    /// Changes further apart than the expected step.
    pub gaps: usize,
    pub first_gap: Option<NaiveDateTime>,
    pub max_gap_seconds: Option<f64>,
    pub columns: Vec<ColumnProfile>,
}

pub fn profile_table(table: &TrendTable, expected_step_seconds: Option<f64>) -> TableProfile {
    let index = table.index();
    let mut report = TableProfile {
        rows: table.rows(),
        first_timestamp: index.first().copied(),
        last_timestamp: index.last().copied(),
        ..TableProfile::default()
    };

    let step = expected_step_seconds.filter(|s| *s > 0.0);
    let mut max_gap: Option<f64> = None;
    for pair in index.windows(2) {
        let diff = seconds_between(pair[0], pair[1]);
        max_gap = Some(max_gap.map_or(diff, |current| current.max(diff)));
        if step.is_some_and(|s| diff > s) {
            report.gaps += 1;
            if report.first_gap.is_none() {
                report.first_gap = Some(pair[1]);
            }
        }
    }
    report.max_gap_seconds = max_gap;

    report.columns = table
        .columns()
        .iter()
        .map(|column| {
            let series = ValidSeries::from_column(index, column);
            ColumnProfile {
                name: column.name.clone(),
                valid: series.len(),
                invalid: column.cells.len() - series.len(),
                first_valid: series.times.first().copied(),
                last_valid: series.times.last().copied(),
                min: series.values.iter().copied().reduce(f64::min),
                max: series.values.iter().copied().reduce(f64::max),
            }
        })
        .collect();
    report
}
