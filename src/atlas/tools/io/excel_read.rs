use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::atlas::tools::error::{Result, ToolError};
use crate::atlas::tools::model::table::TABLE_NAMES;
use crate::atlas::tools::model::{CellValue, Row, SourceTables};

/// Reads every required table from an Excel workbook. Each table is a sheet
/// named after it whose first row holds the column headers.
pub fn read_tables(path: &Path) -> Result<SourceTables> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut tables = SourceTables::new();

    for name in TABLE_NAMES {
        let range = read_required_sheet(&mut workbook, name)?;
        let rows = rows_with_header(&range, name)?;
        debug!(table = name, rows = rows.len(), "sheet loaded");
        tables.insert(name, rows);
    }

    Ok(tables)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::MissingTable(name.to_string()))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn rows_with_header(range: &Range<DataType>, table: &str) -> Result<Vec<Row>> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers = header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| normalize_header(cell, table, index))
        .collect::<Result<Vec<_>>>()?;

    let mut result = Vec::new();
    for cells in rows {
        if cells.iter().all(is_blank) {
            continue;
        }
        let mut row = Row::new();
        for (index, header) in headers.iter().enumerate() {
            let value = cells.get(index).map(cell_value).unwrap_or(CellValue::Empty);
            row.insert(header.clone(), value);
        }
        result.push(row);
    }
    Ok(result)
}

fn normalize_header(cell: &DataType, table: &str, index: usize) -> Result<String> {
    match cell {
        DataType::Empty => Err(ToolError::EmptyHeader {
            table: table.to_string(),
            column: index + 1,
        }),
        DataType::String(value) => Ok(value.trim().to_string()),
        other => Ok(other.to_string().trim().to_string()),
    }
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(value) => value.trim().is_empty(),
        _ => false,
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.trim().to_string()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}
