use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;
use regrid_domain::entities::resampled::TimeAxis;
use regrid_domain::entities::table::{Column, TrendTable};
use regrid_domain::errors::ColumnIssue;
use regrid_domain::services::grid::build_grid;
use regrid_domain::services::resample::resample_table;
use regrid_domain::services::time_axis::to_time_axis;
use regrid_domain::value_objects::cell::Cell;
use regrid_domain::value_objects::interval::Interval;
use regrid_domain::value_objects::resample_config::{
    InitialValuePolicy, ResampleConfig, ResampleMode,
};
use regrid_domain::value_objects::time_unit::OutputTimeUnit;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 4, 11)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("base")
}

fn secs(s: i64) -> TimeDelta {
    TimeDelta::try_seconds(s).expect("delta")
}

fn times_from_gaps(gaps: &[i64]) -> Vec<NaiveDateTime> {
    let mut ts = base();
    let mut out = vec![ts];
    for gap in gaps {
        ts += secs(*gap);
        out.push(ts);
    }
    out
}

fn mode_strategy() -> impl Strategy<Value = ResampleMode> {
    prop_oneof![Just(ResampleMode::Step), Just(ResampleMode::Interpolate)]
}

fn policy_strategy() -> impl Strategy<Value = InitialValuePolicy> {
    prop_oneof![
        Just(InitialValuePolicy::MinOfTrend),
        Just(InitialValuePolicy::FirstValue),
        Just(InitialValuePolicy::Blank),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn grid_stays_on_boundaries_and_inside_end(
        interval_secs in 1i64..7200,
        span_secs in 0i64..500_000,
    ) {
        let interval = Interval::from_seconds(interval_secs as f64).expect("interval");
        let start = base();
        let end = start + secs(span_secs);
        let grid = build_grid(start, Some(end), interval, start).expect("grid");

        prop_assert!(!grid.is_empty());
        prop_assert!(grid.last().copied().expect("last") <= end);
        prop_assert!(grid.last().copied().expect("last") + secs(interval_secs) > end);
        for (k, ts) in grid.iter().enumerate() {
            prop_assert_eq!(*ts, start + secs(interval_secs * k as i64));
        }
    }

    #[test]
    fn open_ended_grid_covers_the_last_source_timestamp(
        interval_secs in 1i64..7200,
        span_secs in 0i64..500_000,
    ) {
        let interval = Interval::from_seconds(interval_secs as f64).expect("interval");
        let last = base() + secs(span_secs);
        let grid = build_grid(base(), None, interval, last).expect("grid");
        let realized = grid.last().copied().expect("last");
        prop_assert!(realized >= last);
        prop_assert!(realized - secs(interval_secs) < last);
    }

    #[test]
    fn step_mode_is_identity_on_uniform_input(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..60),
        interval_secs in 1i64..3600,
        policy in policy_strategy(),
    ) {
        let index: Vec<NaiveDateTime> = (0..values.len())
            .map(|k| base() + secs(interval_secs * k as i64))
            .collect();
        let cells: Vec<Cell> = values.iter().copied().map(Cell::Valid).collect();
        let table = TrendTable::new(index, vec![Column::new("Item 1", cells.clone())]).expect("table");
        let config = ResampleConfig {
            interval_seconds: interval_secs as f64,
            initial_value_policy: policy,
            ..ResampleConfig::default()
        };

        let out = resample_table("uniform", &table, &config).expect("resample");
        prop_assert_eq!(&out.table.columns[0].cells, &cells);
        prop_assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn interpolated_values_stay_within_source_bounds(
        gaps in prop::collection::vec(1i64..7200, 1..40),
        raw in prop::collection::vec(-1_000.0f64..1_000.0, 41),
        interval_secs in 1i64..1800,
    ) {
        let index = times_from_gaps(&gaps);
        let values = &raw[..index.len()];
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let last = index[index.len() - 1];

        let table = TrendTable::new(
            index,
            vec![Column::new("Item 1", values.iter().copied().map(Cell::Valid).collect())],
        )
        .expect("table");
        let config = ResampleConfig {
            interval_seconds: interval_secs as f64,
            mode: ResampleMode::Interpolate,
            ..ResampleConfig::default()
        };
        let out = resample_table("lerp", &table, &config).expect("resample");

        let TimeAxis::Timestamps(grid) = &out.table.axis else {
            return Err(TestCaseError::fail("expected timestamps"));
        };
        let tolerance = 1e-6 * (1.0 + hi.abs().max(lo.abs()));
        for (ts, cell) in grid.iter().zip(out.table.columns[0].cells.iter()) {
            if *ts > last {
                continue;
            }
            let value = cell.value().expect("interpolated cell");
            prop_assert!(value >= lo - tolerance && value <= hi + tolerance);
        }
    }

    #[test]
    fn all_invalid_columns_stay_invalid(
        rows in 1usize..30,
        mode in mode_strategy(),
        policy in policy_strategy(),
    ) {
        let index: Vec<NaiveDateTime> = (0..rows).map(|k| base() + secs(300 * k as i64)).collect();
        let table = TrendTable::new(index, vec![Column::new("dead", vec![Cell::Invalid; rows])])
            .expect("table");
        let config = ResampleConfig {
            mode,
            initial_value_policy: policy,
            ..ResampleConfig::default()
        };
        let out = resample_table("dead", &table, &config).expect("resample");
        prop_assert!(out.table.columns[0].cells.iter().all(|c| !c.is_valid()));
        prop_assert_eq!(out.diagnostics.len(), 1);
        prop_assert_eq!(out.diagnostics[0].issue, ColumnIssue::AllInvalidColumn);
    }

    #[test]
    fn seconds_and_days_axes_agree_exactly(gaps in prop::collection::vec(1i64..200_000, 0..50)) {
        let grid = times_from_gaps(&gaps);
        let seconds = to_time_axis(grid.clone(), OutputTimeUnit::Seconds);
        let days = to_time_axis(grid, OutputTimeUnit::Days);
        match (seconds, days) {
            (TimeAxis::Offsets { values: s, .. }, TimeAxis::Offsets { values: d, .. }) => {
                prop_assert_eq!(s.len(), d.len());
                for (s, d) in s.iter().zip(d.iter()) {
                    prop_assert_eq!(s / 86_400.0, *d);
                }
            }
            _ => return Err(TestCaseError::fail("expected offsets")),
        }
    }
}
