use crate::entities::table::ValidSeries;
use crate::services::initial_value::ColumnSeed;
use crate::services::time_axis::seconds_between;
use crate::value_objects::cell::Cell;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated {
    pub cells: Vec<Cell>,
    /// Cells left `Invalid` because the line through their anchors was
    /// degenerate or overflowed.
    pub degenerate: usize,
}

/// Value at `t` on the line through `a` and `b`. Works on either side of the
/// segment, so it also serves extrapolation.
pub fn linear(t: NaiveDateTime, a: (NaiveDateTime, f64), b: (NaiveDateTime, f64)) -> Cell {
    let span = seconds_between(a.0, b.0);
    if span == 0.0 {
        return Cell::Invalid;
    }
    Cell::from_f64(a.1 + (b.1 - a.1) * seconds_between(a.0, t) / span)
}

/// Trailing-edge estimate from the last two observations. A lone
/// observation is held flat.
pub fn extrapolate(series: &ValidSeries, t: NaiveDateTime) -> Cell {
    let n = series.len();
    match n {
        0 => Cell::Invalid,
        1 => Cell::Valid(series.values[0]),
        _ => linear(
            t,
            (series.times[n - 2], series.values[n - 2]),
            (series.times[n - 1], series.values[n - 1]),
        ),
    }
}

/// Source-only estimate at `t`, used to seed a column at its first grid point.
/// Expects `t` at or after the first observation.
pub fn value_at(series: &ValidSeries, t: NaiveDateTime) -> Cell {
    let k = series.count_before(t);
    if k == series.len() {
        return extrapolate(series, t);
    }
    if series.times[k] == t || k == 0 {
        return Cell::Valid(series.values[k]);
    }
    linear(
        t,
        (series.times[k - 1], series.values[k - 1]),
        (series.times[k], series.values[k]),
    )
}

/// Fills the grid after the seed by blending between the previous grid point
/// and the next observation at or after each grid timestamp. Observations
/// passed between two grid points only matter through that next observation.
pub fn propagate_interpolated(
    series: &ValidSeries,
    grid: &[NaiveDateTime],
    seed: &ColumnSeed,
) -> Interpolated {
    let mut cells = vec![Cell::Invalid; grid.len()];
    let mut degenerate = 0;
    let Some(&seed_time) = grid.get(seed.seed_index) else {
        return Interpolated { cells, degenerate };
    };
    cells[seed.seed_index] = Cell::Valid(seed.seed);

    let mut anchor = (seed_time, seed.seed);
    let mut next = series.count_at_or_before(seed_time);

    for (i, &t) in grid.iter().enumerate().skip(seed.start_index()) {
        while next < series.len() && series.times[next] < t {
            next += 1;
        }

        let cell = match (series.times.get(next), series.values.get(next)) {
            (Some(&tb), Some(&b)) if tb == t => Cell::Valid(b),
            (Some(&tb), Some(&b)) => linear(t, anchor, (tb, b)),
            _ => extrapolate(series, t),
        };
        match cell {
            Cell::Valid(v) => anchor = (t, v),
            Cell::Invalid => degenerate += 1,
        }
        cells[i] = cell;
    }

    Interpolated { cells, degenerate }
}
