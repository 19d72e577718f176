use crate::errors::ResampleError;
use crate::value_objects::interval::Interval;
use chrono::NaiveDateTime;

/// Upper bound on output rows per dataset.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Builds `start + k * interval` for `k = 0..N`.
///
/// Without `end`, the grid grows until it covers `last_source`. With `end`,
/// it stops at the last boundary at or before `end`.
pub fn build_grid(
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    interval: Interval,
    last_source: NaiveDateTime,
) -> Result<Vec<NaiveDateTime>, ResampleError> {
    let step = interval.millis();
    let steps = match end {
        Some(end) => {
            if end < start {
                return Err(ResampleError::InvalidConfiguration(format!(
                    "end_time {end} is before start_time {start}"
                )));
            }
            (end - start).num_milliseconds() / step
        }
        None => {
            if start > last_source {
                return Err(ResampleError::InvalidConfiguration(format!(
                    "start_time {start} is after the last source timestamp {last_source} and no end_time was given"
                )));
            }
            let span = (last_source - start).num_milliseconds();
            span / step + i64::from(span % step != 0)
        }
    };

    let points = usize::try_from(steps)
        .ok()
        .and_then(|s| s.checked_add(1))
        .filter(|n| *n <= MAX_GRID_POINTS)
        .ok_or_else(|| {
            ResampleError::InvalidConfiguration(format!(
                "grid of {steps} intervals exceeds {MAX_GRID_POINTS} points"
            ))
        })?;

    let mut grid = Vec::with_capacity(points);
    for k in 0..points as i64 {
        let ts = interval
            .times(k)
            .and_then(|offset| start.checked_add_signed(offset))
            .ok_or_else(|| {
                ResampleError::InvalidConfiguration(format!(
                    "grid point {k} overflows the timestamp range"
                ))
            })?;
        grid.push(ts);
    }
    Ok(grid)
}
