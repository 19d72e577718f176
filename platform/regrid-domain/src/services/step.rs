use crate::entities::table::ValidSeries;
use crate::services::initial_value::ColumnSeed;
use crate::value_objects::cell::Cell;
use chrono::NaiveDateTime;

/// Hold-last-value fill. A new observation takes effect at its own timestamp.
pub fn propagate_step(series: &ValidSeries, grid: &[NaiveDateTime], seed: &ColumnSeed) -> Vec<Cell> {
    let mut cells = vec![Cell::Invalid; grid.len()];
    let Some(&seed_time) = grid.get(seed.seed_index) else {
        return cells;
    };
    cells[seed.seed_index] = Cell::Valid(seed.seed);

    let mut cursor = series.count_at_or_before(seed_time);
    let mut current = seed.seed;
    for (i, t) in grid.iter().enumerate().skip(seed.start_index()) {
        while cursor < series.len() && series.times[cursor] <= *t {
            current = series.values[cursor];
            cursor += 1;
        }
        cells[i] = Cell::Valid(current);
    }
    cells
}
