use crate::writers::time_labels;
use regrid_domain::entities::resampled::{ResampledDataset, TimeAxis};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Longest table name spreadsheet tools accept.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

#[derive(Debug, Serialize)]
struct WorkbookDocument<'a> {
    tables: Vec<TableDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct TableDocument<'a> {
    name: String,
    time_unit: &'static str,
    columns: Vec<&'a str>,
    rows: Vec<RowDocument>,
}

#[derive(Debug, Serialize)]
struct RowDocument {
    time: serde_json::Value,
    values: Vec<Option<f64>>,
}

pub fn write_json(
    path: &Path,
    tables: &[ResampledDataset],
    time_format: &str,
) -> Result<(), String> {
    let names = sheet_names(tables.iter().map(|t| t.name.as_str()));
    let mut document = WorkbookDocument {
        tables: Vec::with_capacity(tables.len()),
    };
    for (dataset, name) in tables.iter().zip(names) {
        let table = &dataset.table;
        let times: Vec<serde_json::Value> = match &table.axis {
            TimeAxis::Offsets { values, .. } => values.iter().map(|v| serde_json::json!(v)).collect(),
            TimeAxis::Timestamps(_) => time_labels(&table.axis, time_format)?
                .into_iter()
                .map(serde_json::Value::String)
                .collect(),
        };
        let rows = times
            .into_iter()
            .enumerate()
            .map(|(row, time)| RowDocument {
                time,
                values: table
                    .columns
                    .iter()
                    .map(|c| c.cells.get(row).and_then(|cell| cell.value()))
                    .collect(),
            })
            .collect();
        document.tables.push(TableDocument {
            name,
            time_unit: table.axis.unit().label(),
            columns: table.columns.iter().map(|c| c.name.as_str()).collect(),
            rows,
        });
    }

    let file = File::create(path)
        .map_err(|err| format!("failed to create json {}: {}", path.display(), err))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)
        .map_err(|err| format!("failed to serialize json {}: {}", path.display(), err))?;
    writer
        .flush()
        .map_err(|err| format!("failed to flush json {}: {}", path.display(), err))
}

/// Truncates names to [`MAX_SHEET_NAME_CHARS`] and suffixes collisions with `~N`.
pub fn sheet_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut used = BTreeSet::new();
    names
        .map(|name| {
            let mut candidate = truncate_chars(name, MAX_SHEET_NAME_CHARS);
            let mut n = 1;
            while used.contains(&candidate) {
                let suffix = format!("~{n}");
                let keep = MAX_SHEET_NAME_CHARS.saturating_sub(suffix.chars().count());
                candidate = format!("{}{}", truncate_chars(name, keep), suffix);
                n += 1;
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::{sheet_names, write_json, MAX_SHEET_NAME_CHARS};
    use chrono::NaiveDate;
    use regrid_domain::entities::resampled::{
        ResampledColumn, ResampledDataset, ResampledTable, TimeAxis,
    };
    use regrid_domain::value_objects::cell::Cell;
    use std::fs;

    #[test]
    fn sheet_names_are_truncated_and_unique() {
        let long = "Chilled water plant trend export, building A";
        let names = sheet_names([long, long, "Sheet1"].into_iter());
        assert_eq!(names[0].chars().count(), MAX_SHEET_NAME_CHARS);
        assert!(long.starts_with(&names[0]));
        assert!(names[1].ends_with("~1"));
        assert_eq!(names[1].chars().count(), MAX_SHEET_NAME_CHARS);
        assert_ne!(names[0], names[1]);
        assert_eq!(names[2], "Sheet1");
    }

    #[test]
    fn writes_tables_with_null_for_invalid_cells() {
        let ts = NaiveDate::from_ymd_opt(2017, 4, 11)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("ts");
        let dataset = |name: &str| ResampledDataset {
            name: name.to_string(),
            table: ResampledTable {
                axis: TimeAxis::Timestamps(vec![ts]),
                columns: vec![
                    ResampledColumn {
                        name: "Item 1".to_string(),
                        cells: vec![Cell::Valid(4.5)],
                    },
                    ResampledColumn {
                        name: "Item 2".to_string(),
                        cells: vec![Cell::Invalid],
                    },
                ],
            },
        };
        let path = std::env::temp_dir().join(format!("regrid_json_out_{}.json", std::process::id()));
        write_json(&path, &[dataset("Sheet1"), dataset("Sheet2")], "%Y-%m-%d %H:%M:%S")
            .expect("write");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        let tables = value["tables"].as_array().expect("tables");
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1]["name"], "Sheet2");
        assert_eq!(tables[0]["time_unit"], "none");
        assert_eq!(tables[0]["rows"][0]["time"], "2017-04-11 12:00:00");
        assert_eq!(tables[0]["rows"][0]["values"][0], 4.5);
        assert!(tables[0]["rows"][0]["values"][1].is_null());
        let _ = fs::remove_file(&path);
    }
}
