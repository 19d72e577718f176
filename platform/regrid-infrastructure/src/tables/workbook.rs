use crate::tables::assemble::{column_names, TableAssembler};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDateTime;
use regrid_domain::repositories::table_source::{LoadQuery, LoadedCollection, LoadedDataset};
use regrid_domain::value_objects::cell::Cell;
use regrid_domain::value_objects::timestamp::parse_timestamp;

/// Reads the requested sheets, or the first one when none are named.
pub fn load_workbook(query: &LoadQuery) -> Result<LoadedCollection, String> {
    let path = &query.path;
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| format!("failed to open workbook {}: {}", path.display(), err))?;
    let available = workbook.sheet_names();

    let sheets = if query.sheets.is_empty() {
        let first = available
            .first()
            .cloned()
            .ok_or_else(|| format!("workbook {} has no sheets", path.display()))?;
        vec![first]
    } else {
        for sheet in &query.sheets {
            if !available.contains(sheet) {
                return Err(format!(
                    "sheet {sheet} not found in {} (available: {})",
                    path.display(),
                    available.join(", ")
                ));
            }
        }
        query.sheets.clone()
    };

    let mut loaded = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|err| format!("failed to read sheet {sheet} of {}: {}", path.display(), err))?;
        loaded.push(load_sheet(&sheet, &range, query)?);
    }
    Ok(loaded)
}

fn load_sheet(
    sheet: &str,
    range: &Range<Data>,
    query: &LoadQuery,
) -> Result<LoadedDataset, String> {
    let skip = query.header_row.unwrap_or(0);
    let mut rows = range.rows().enumerate().skip(skip);
    let (_, first) = rows
        .next()
        .ok_or_else(|| format!("sheet {sheet} has no rows after row {skip}"))?;
    let width = first.len().saturating_sub(1);
    if width == 0 {
        return Err(format!("sheet {sheet} has a single column"));
    }

    let headers: Vec<Option<String>> = first.iter().skip(1).map(header_text).collect();
    let (columns, pending) = match query.header_row {
        Some(_) => (column_names(headers.iter().map(|h| h.as_deref())), None),
        None => (column_names((0..width).map(|_| None)), Some((skip, first))),
    };

    let mut asm = TableAssembler::new(sheet, columns);
    for (row_idx, row) in pending.into_iter().chain(rows) {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let ts = row
            .first()
            .ok_or_else(|| format!("sheet {sheet} row {} is empty", row_idx + 1))
            .and_then(|cell| timestamp_of(cell, query.time_format.as_deref()))
            .map_err(|err| format!("sheet {sheet} row {}: {}", row_idx + 1, err))?;
        let cells = row
            .iter()
            .skip(1)
            .take(width)
            .map(|cell| classify(&mut asm, cell))
            .collect();
        asm.push(ts, cells);
    }
    asm.finish()
}

fn header_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn timestamp_of(cell: &Data, time_format: Option<&str>) -> Result<NaiveDateTime, String> {
    match cell {
        Data::DateTime(dt) => dt
            .as_datetime()
            .ok_or_else(|| format!("unrepresentable excel date {}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::String(s) => parse_timestamp(s, time_format),
        other => Err(format!("expected a timestamp, got {other}")),
    }
}

fn classify(asm: &mut TableAssembler, cell: &Data) -> Cell {
    match cell {
        Data::Float(v) => {
            let parsed = Cell::from_f64(*v);
            if !parsed.is_valid() {
                asm.count_invalid(1);
            }
            parsed
        }
        Data::Int(v) => Cell::Valid(*v as f64),
        Data::String(s) => asm.classify(s),
        Data::Empty => {
            asm.count_missing(1);
            Cell::Invalid
        }
        _ => {
            asm.count_invalid(1);
            Cell::Invalid
        }
    }
}
