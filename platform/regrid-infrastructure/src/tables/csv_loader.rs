use crate::tables::assemble::{column_names, TableAssembler};
use regrid_domain::repositories::table_source::{LoadQuery, LoadedDataset};
use regrid_domain::value_objects::cell::Cell;
use regrid_domain::value_objects::timestamp::parse_timestamp;
use std::fs;
use std::path::Path;

const SEPARATORS: [u8; 3] = [b',', b';', b'\t'];

pub fn load_csv(query: &LoadQuery) -> Result<LoadedDataset, String> {
    let path = &query.path;
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to open csv {}: {}", path.display(), err))?;
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    let skip = query.header_row.unwrap_or(0);
    let body = &contents[skip_lines(contents, skip)..];
    let separator = sniff_separator(body.lines().next().unwrap_or(""));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    let first = records
        .next()
        .ok_or_else(|| format!("csv {} has no rows after line {}", path.display(), skip))?
        .map_err(|err| format!("failed to read csv header {}: {}", path.display(), err))?;
    let width = first.len().saturating_sub(1);
    if width == 0 {
        return Err(format!(
            "csv {} has a single column; expected a time column followed by values",
            path.display()
        ));
    }
    let (columns, pending) = match query.header_row {
        Some(_) => (column_names(first.iter().skip(1).map(Some)), None),
        None => (column_names((0..width).map(|_| None)), Some(first)),
    };

    let mut asm = TableAssembler::new(dataset_name(path), columns);
    for result in pending.into_iter().map(Ok).chain(records) {
        let record = result
            .map_err(|err| format!("failed to parse csv row in {}: {}", path.display(), err))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, |pos| pos.line()) + skip as u64;
        let raw_ts = record.get(0).unwrap_or("");
        let ts = parse_timestamp(raw_ts, query.time_format.as_deref())
            .map_err(|err| format!("{} line {}: {}", path.display(), line, err))?;
        let cells: Vec<Cell> = record
            .iter()
            .skip(1)
            .take(width)
            .map(|raw| asm.classify(raw))
            .collect();
        asm.push(ts, cells);
    }
    asm.finish()
}

/// First separator that splits the header line into more than one field.
pub fn sniff_separator(line: &str) -> u8 {
    SEPARATORS
        .into_iter()
        .find(|sep| line.split(char::from(*sep)).count() > 1)
        .unwrap_or(b',')
}

fn skip_lines(contents: &str, lines: usize) -> usize {
    contents
        .split_inclusive('\n')
        .take(lines)
        .map(str::len)
        .sum()
}

pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data")
        .to_string()
}
