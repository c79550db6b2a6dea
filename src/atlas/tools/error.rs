use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Exit code reported when validation found at least one problem.
pub const EXIT_VALIDATION: i32 = 1;
/// Exit code reported when the source could not be loaded or the CLI was misused.
pub const EXIT_LOAD: i32 = 2;
/// Exit code reported when the artifact could not be written.
pub const EXIT_OUTPUT: i32 = 3;

/// Error type covering the different failure cases that can occur when the
/// tool loads source tables, validates them, or emits the artifact.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raised when the data structure cannot be serialized into the artifact.
    #[error("failed to render artifact: {0}")]
    Render(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the CSV reader.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when one of the required tables is absent from the source.
    #[error("required table '{0}' is missing")]
    MissingTable(String),

    /// Raised when the CSV file backing a table does not exist.
    #[error("CSV file for table '{table}' not found: {path}")]
    MissingTableFile { table: String, path: PathBuf },

    /// Raised when a header row contains an empty cell.
    #[error("table '{table}' has an empty column header in column {column}")]
    EmptyHeader { table: String, column: usize },

    /// Raised when the user provides a path that does not exist.
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the source path is neither an `.xlsx` file nor a directory.
    #[error("unsupported source {0}: expected an .xlsx workbook or a directory of CSV files")]
    UnsupportedSource(PathBuf),

    /// Raised when the command line combination is not meaningful.
    #[error("{0}")]
    Usage(String),

    /// Raised when the source tables contain one or more validation errors.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(ValidationErrors),

    /// Raised when the rendered artifact could not be written.
    #[error("failed to write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    /// Maps the error onto the process exit code used by the command line.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Validation(_) => EXIT_VALIDATION,
            ToolError::Output { .. } | ToolError::Render(_) | ToolError::ExcelWrite(_) => {
                EXIT_OUTPUT
            }
            _ => EXIT_LOAD,
        }
    }
}

/// Ordered list of human-readable validation messages collected during a
/// single pass over the source tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message. Messages keep the order in which they were pushed.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "validation error recorded");
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Converts the collected messages into `Ok(())` when empty or a
    /// [`ToolError::Validation`] otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ToolError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, message) in self.messages.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
