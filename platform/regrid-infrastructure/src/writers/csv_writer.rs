use crate::writers::time_labels;
use regrid_domain::entities::resampled::ResampledTable;
use regrid_domain::value_objects::cell::Cell;
use std::path::Path;

/// Writes `Time,<columns...>`; invalid cells become empty fields.
pub fn write_csv(
    path: &Path,
    table: &ResampledTable,
    separator: u8,
    time_format: &str,
) -> Result<(), String> {
    let labels = time_labels(&table.axis, time_format)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(separator)
        .from_path(path)
        .map_err(|err| format!("failed to create csv {}: {}", path.display(), err))?;

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push("Time");
    header.extend(table.columns.iter().map(|c| c.name.as_str()));
    wtr.write_record(&header)
        .map_err(|err| format!("failed to write csv header: {}", err))?;

    for (row, label) in labels.into_iter().enumerate() {
        let mut record = Vec::with_capacity(table.columns.len() + 1);
        record.push(label);
        for column in &table.columns {
            record.push(match column.cells.get(row).copied().unwrap_or_default() {
                Cell::Valid(v) => v.to_string(),
                Cell::Invalid => String::new(),
            });
        }
        wtr.write_record(&record)
            .map_err(|err| format!("failed to write csv row {}: {}", row + 1, err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush csv {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::write_csv;
    use chrono::NaiveDate;
    use regrid_domain::entities::resampled::{ResampledColumn, ResampledTable, TimeAxis};
    use regrid_domain::value_objects::cell::Cell;
    use regrid_domain::value_objects::time_unit::OutputTimeUnit;
    use std::fs;

    fn table(axis: TimeAxis) -> ResampledTable {
        ResampledTable {
            axis,
            columns: vec![
                ResampledColumn {
                    name: "Item 1".to_string(),
                    cells: vec![Cell::Invalid, Cell::Valid(4.5)],
                },
                ResampledColumn {
                    name: "Item 2".to_string(),
                    cells: vec![Cell::Valid(1.0), Cell::Valid(-2.0)],
                },
            ],
        }
    }

    #[test]
    fn writes_header_timestamps_and_blank_invalid_cells() {
        let day = NaiveDate::from_ymd_opt(2017, 4, 11).expect("date");
        let axis = TimeAxis::Timestamps(vec![
            day.and_hms_opt(12, 0, 0).expect("ts"),
            day.and_hms_opt(12, 10, 0).expect("ts"),
        ]);
        let path = std::env::temp_dir().join(format!("regrid_csv_out_{}.csv", std::process::id()));
        write_csv(&path, &table(axis), b';', "%Y-%m-%d %H:%M:%S").expect("write");

        let contents = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Time;Item 1;Item 2");
        assert_eq!(lines[1], "2017-04-11 12:00:00;;1");
        assert_eq!(lines[2], "2017-04-11 12:10:00;4.5;-2");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn writes_numeric_offsets() {
        let origin = NaiveDate::from_ymd_opt(2017, 4, 11)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("ts");
        let axis = TimeAxis::Offsets {
            unit: OutputTimeUnit::Hours,
            origin,
            values: vec![0.0, 0.5],
        };
        let path = std::env::temp_dir().join(format!("regrid_csv_offsets_{}.csv", std::process::id()));
        write_csv(&path, &table(axis), b',', "%Y").expect("write");
        let contents = fs::read_to_string(&path).expect("read");
        assert!(contents.lines().nth(2).expect("row").starts_with("0.5,"));
        let _ = fs::remove_file(&path);
    }
}
