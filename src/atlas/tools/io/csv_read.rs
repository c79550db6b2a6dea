use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::atlas::tools::error::{Result, ToolError};
use crate::atlas::tools::model::table::TABLE_NAMES;
use crate::atlas::tools::model::{CellValue, Row, SourceTables};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads every required table from `<directory>/<table>.csv`.
pub fn read_tables(directory: &Path) -> Result<SourceTables> {
    let mut tables = SourceTables::new();
    for name in TABLE_NAMES {
        let path = directory.join(format!("{name}.csv"));
        if !path.is_file() {
            return Err(ToolError::MissingTableFile {
                table: name.to_string(),
                path,
            });
        }
        let rows = read_table(&path)?;
        debug!(table = name, rows = rows.len(), "CSV file loaded");
        tables.insert(name, rows);
    }
    Ok(tables)
}

/// Reads one CSV file. The first record is the header; short records leave
/// their trailing columns empty and fully blank records are skipped.
pub fn read_table(path: &Path) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = Row::from_pairs(headers.iter().enumerate().map(|(index, header)| {
            let value = record
                .get(index)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| CellValue::Text(value.to_string()))
                .unwrap_or(CellValue::Empty);
            (header.clone(), value)
        }));
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}
