pub mod csv_read;
pub mod datajs;
pub mod excel_read;
pub mod excel_write;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::atlas::tools::error::{Result, ToolError};
use crate::atlas::tools::model::SourceTables;

/// Location the source tables are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// `.xlsx` workbook with one sheet per table.
    Workbook(PathBuf),
    /// Directory holding one `<table>.csv` file per table.
    CsvDirectory(PathBuf),
}

impl TableSource {
    pub fn path(&self) -> &Path {
        match self {
            TableSource::Workbook(path) | TableSource::CsvDirectory(path) => path,
        }
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Workbook(path) => write!(f, "XLSX workbook {}", path.display()),
            TableSource::CsvDirectory(path) => write!(f, "CSV directory {}", path.display()),
        }
    }
}

/// Loads all seven tables from `source`. Any failure here is fatal.
pub fn load_tables(source: &TableSource) -> Result<SourceTables> {
    let path = source.path();
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    match source {
        TableSource::Workbook(path) => {
            let is_xlsx = path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| extension.eq_ignore_ascii_case("xlsx"));
            if !path.is_file() || !is_xlsx {
                return Err(ToolError::UnsupportedSource(path.clone()));
            }
            excel_read::read_tables(path)
        }
        TableSource::CsvDirectory(path) => {
            if !path.is_dir() {
                return Err(ToolError::UnsupportedSource(path.clone()));
            }
            csv_read::read_tables(path)
        }
    }
}
