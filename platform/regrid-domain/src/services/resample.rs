use crate::entities::resampled::{ResampledColumn, ResampledTable};
use crate::entities::table::{TrendTable, ValidSeries};
use crate::errors::{ColumnDiagnostic, ColumnIssue, ResampleError};
use crate::services::grid::build_grid;
use crate::services::initial_value::{resolve_seed, SeedResolution};
use crate::services::interpolate::propagate_interpolated;
use crate::services::step::propagate_step;
use crate::services::time_axis::to_time_axis;
use crate::value_objects::cell::Cell;
use crate::value_objects::resample_config::{ResampleConfig, ResampleMode};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct ResampleOutput {
    pub table: ResampledTable,
    pub grid_start: NaiveDateTime,
    pub grid_end: NaiveDateTime,
    pub diagnostics: Vec<ColumnDiagnostic>,
}

/// Resamples every column of `table` onto one uniform grid.
///
/// Column-level problems are returned as diagnostics; only configuration
/// problems (bad interval, empty grid) fail the call.
pub fn resample_table(
    name: &str,
    table: &TrendTable,
    config: &ResampleConfig,
) -> Result<ResampleOutput, ResampleError> {
    let interval = config.interval()?;
    let start = config.start_time.unwrap_or_else(|| table.first_timestamp());
    let grid = build_grid(start, config.end_time, interval, table.last_timestamp())?;
    let grid_end = grid.last().copied().unwrap_or(start);

    let mut diagnostics = Vec::new();
    let mut columns = Vec::with_capacity(table.columns().len());
    for column in table.columns() {
        let series = ValidSeries::from_column(table.index(), column);
        let mut report = |issue: ColumnIssue| {
            diagnostics.push(ColumnDiagnostic {
                dataset: name.to_string(),
                column: column.name.clone(),
                issue,
            })
        };

        let cells = match resolve_seed(&series, &grid, config.initial_value_policy, config.mode) {
            SeedResolution::Seeded(seed) => match config.mode {
                ResampleMode::Step => propagate_step(&series, &grid, &seed),
                ResampleMode::Interpolate => {
                    let out = propagate_interpolated(&series, &grid, &seed);
                    if out.degenerate > 0 {
                        report(ColumnIssue::DegenerateCells {
                            count: out.degenerate,
                        });
                    }
                    out.cells
                }
            },
            SeedResolution::Unseeded(issue) => {
                report(issue);
                vec![Cell::Invalid; grid.len()]
            }
        };
        columns.push(ResampledColumn {
            name: column.name.clone(),
            cells,
        });
    }

    Ok(ResampleOutput {
        table: ResampledTable {
            axis: to_time_axis(grid, config.output_time_unit),
            columns,
        },
        grid_start: start,
        grid_end,
        diagnostics,
    })
}
