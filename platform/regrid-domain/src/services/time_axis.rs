use crate::entities::resampled::TimeAxis;
use crate::value_objects::time_unit::OutputTimeUnit;
use chrono::NaiveDateTime;

/// Signed elapsed seconds from `from` to `to`, with sub-second precision.
pub fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to - from;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// Labels a grid either with its timestamps or with offsets from its first point.
pub fn to_time_axis(grid: Vec<NaiveDateTime>, unit: OutputTimeUnit) -> TimeAxis {
    let (Some(per_unit), Some(&origin)) = (unit.seconds_per_unit(), grid.first()) else {
        return TimeAxis::Timestamps(grid);
    };
    let values = grid
        .iter()
        .map(|ts| seconds_between(origin, *ts) / per_unit)
        .collect();
    TimeAxis::Offsets {
        unit,
        origin,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::{seconds_between, to_time_axis};
    use crate::entities::resampled::TimeAxis;
    use crate::value_objects::time_unit::OutputTimeUnit;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 4, 11)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("ts")
    }

    #[test]
    fn seconds_between_keeps_sub_second_precision() {
        let start = at(10, 0);
        let later = start + TimeDelta::try_milliseconds(1500).expect("delta");
        assert_eq!(seconds_between(start, later), 1.5);
        assert_eq!(seconds_between(later, start), -1.5);
    }

    #[test]
    fn offsets_are_measured_from_the_grid_start() {
        let grid = vec![at(10, 0), at(10, 30), at(11, 0)];
        match to_time_axis(grid.clone(), OutputTimeUnit::Hours) {
            TimeAxis::Offsets {
                unit,
                origin,
                values,
            } => {
                assert_eq!(unit, OutputTimeUnit::Hours);
                assert_eq!(origin, at(10, 0));
                assert_eq!(values, vec![0.0, 0.5, 1.0]);
            }
            other => panic!("expected offsets, got {other:?}"),
        }
        assert_eq!(
            to_time_axis(grid.clone(), OutputTimeUnit::None),
            TimeAxis::Timestamps(grid)
        );
    }
}
