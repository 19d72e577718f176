use crate::entities::table::ValidSeries;
use crate::errors::ColumnIssue;
use crate::services::interpolate::value_at;
use crate::value_objects::cell::Cell;
use crate::value_objects::resample_config::{InitialValuePolicy, ResampleMode};
use chrono::NaiveDateTime;

/// Where and with what value a column starts on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSeed {
    /// Source row of the first valid observation.
    pub first_row: usize,
    /// Grid index holding the seed; earlier points stay `Invalid`.
    pub seed_index: usize,
    pub seed: f64,
}

impl ColumnSeed {
    /// First grid index filled by ordinary propagation.
    pub fn start_index(&self) -> usize {
        self.seed_index + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedResolution {
    Seeded(ColumnSeed),
    /// The column contributes only `Invalid` cells.
    Unseeded(ColumnIssue),
}

/// Decides the seed of one column for the given grid.
pub fn resolve_seed(
    series: &ValidSeries,
    grid: &[NaiveDateTime],
    policy: InitialValuePolicy,
    mode: ResampleMode,
) -> SeedResolution {
    let Some(first_row) = series.first_row else {
        return SeedResolution::Unseeded(ColumnIssue::AllInvalidColumn);
    };
    let (Some(&first_time), Some(&first_value)) = (series.times.first(), series.values.first())
    else {
        return SeedResolution::Unseeded(ColumnIssue::AllInvalidColumn);
    };
    let (Some(&grid_start), Some(&grid_end)) = (grid.first(), grid.last()) else {
        return SeedResolution::Unseeded(ColumnIssue::NoValueInWindow);
    };

    let seeded = |seed_index: usize, seed: f64| {
        SeedResolution::Seeded(ColumnSeed {
            first_row,
            seed_index,
            seed,
        })
    };

    if grid_start >= first_time {
        return match value_in_effect(series, grid_start, mode) {
            Cell::Valid(v) => seeded(0, v),
            Cell::Invalid => SeedResolution::Unseeded(ColumnIssue::DegenerateCells {
                count: grid.len(),
            }),
        };
    }

    match policy {
        InitialValuePolicy::FirstValue => seeded(0, first_value),
        InitialValuePolicy::MinOfTrend => match series.min_in_window(grid_start, grid_end) {
            Some(min) => seeded(0, min),
            None => SeedResolution::Unseeded(ColumnIssue::NumericCoercionFailure),
        },
        InitialValuePolicy::Blank => {
            let seed_index = grid.partition_point(|ts| *ts < first_time);
            match grid.get(seed_index) {
                Some(&ts) => match value_in_effect(series, ts, mode) {
                    Cell::Valid(v) => seeded(seed_index, v),
                    Cell::Invalid => SeedResolution::Unseeded(ColumnIssue::DegenerateCells {
                        count: grid.len(),
                    }),
                },
                None => SeedResolution::Unseeded(ColumnIssue::NoValueInWindow),
            }
        }
    }
}

/// The column's reading at `t`, for `t` at or after its first observation.
pub fn value_in_effect(series: &ValidSeries, t: NaiveDateTime, mode: ResampleMode) -> Cell {
    match mode {
        ResampleMode::Step => series
            .count_at_or_before(t)
            .checked_sub(1)
            .and_then(|k| series.values.get(k))
            .map_or(Cell::Invalid, |v| Cell::Valid(*v)),
        ResampleMode::Interpolate => value_at(series, t),
    }
}
