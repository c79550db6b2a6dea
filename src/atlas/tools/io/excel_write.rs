use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::atlas::tools::error::Result;
use crate::atlas::tools::model::CellValue;
use crate::atlas::tools::model::table::{TABLE_NAMES, expected_columns};

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    /// Creates a sheet with the given header row and no data.
    pub fn new(sheet_name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Returns one empty sheet per required table, carrying the expected headers.
pub fn template_tables() -> Vec<SheetTable> {
    TABLE_NAMES
        .iter()
        .map(|name| SheetTable::new(*name, expected_columns(name)))
        .collect()
}

/// Writes the provided sheets to the given path. Empty cells are left blank.
pub fn write_workbook(path: &Path, tables: &[SheetTable]) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_idx as u16, header, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let excel_col = col_idx as u16;
                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(value) => {
                        worksheet.write_string(excel_row, excel_col, value)?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(excel_row, excel_col, *value)?;
                    }
                    CellValue::Bool(value) => {
                        worksheet.write_boolean(excel_row, excel_col, *value)?;
                    }
                }
            }
        }

        if !table.columns.is_empty() {
            worksheet.set_freeze_panes(1, 0)?;
        }
    }

    workbook_writer.save(path)?;
    Ok(())
}
