use std::collections::HashMap;

use crate::atlas::tools::error::{Result, ToolError};

/// Table holding the map categories.
pub const CATEGORIES: &str = "categories";
/// Table holding the continents and their country lists.
pub const CONTINENTS: &str = "continents";
/// Table holding the countries.
pub const COUNTRIES: &str = "countries";
/// Table holding the map points.
pub const POINTS: &str = "points";
/// Organization-scoped metric rows.
pub const ORG_METRICS: &str = "org_metrics";
/// Organization-scoped progress rows.
pub const ORG_PROGRESS: &str = "org_progress";
/// Per-point two-sided comparison rows.
pub const ORG_COMPARE: &str = "org_compare";

/// Every table a source must provide, in processing order.
pub const TABLE_NAMES: [&str; 7] = [
    CATEGORIES,
    CONTINENTS,
    COUNTRIES,
    POINTS,
    ORG_METRICS,
    ORG_PROGRESS,
    ORG_COMPARE,
];

/// Returns the header row authors are expected to use for `table`.
pub fn expected_columns(table: &str) -> &'static [&'static str] {
    match table {
        CATEGORIES => &["category_key", "label", "icon_id", "color_hex", "description"],
        CONTINENTS => &["continent_name", "country_iso_list", "description"],
        COUNTRIES => &[
            "country_iso3",
            "name",
            "continent_name",
            "active_flag",
            "overview",
        ],
        POINTS => &[
            "point_id",
            "country_iso3",
            "title",
            "category_key",
            "longitude",
            "latitude",
            "description",
            "coming_soon_flag",
        ],
        ORG_METRICS => &[
            "point_id",
            "organization",
            "summary",
            "metric_label",
            "metric_value",
            "metric_trend",
        ],
        ORG_PROGRESS => &[
            "point_id",
            "organization",
            "summary",
            "progress_label",
            "progress_value",
        ],
        ORG_COMPARE => &[
            "point_id",
            "left_label",
            "right_label",
            "summary",
            "metric_label",
            "left_value",
            "right_value",
        ],
        _ => &[],
    }
}

/// Raw value of a single cell as delivered by a source reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Absent or empty cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Native numeric cell.
    Number(f64),
    /// Native boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Returns `true` for absent cells and text cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One data row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let cells = pairs
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        Self { cells }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Returns `true` when every cell of the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }
}

/// All source tables keyed by table name, each an ordered list of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTables {
    tables: HashMap<String, Vec<Row>>,
}

impl SourceTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(name.into(), rows);
    }

    /// Returns the rows of `name` or a [`ToolError::MissingTable`] error.
    pub fn table(&self, name: &str) -> Result<&[Row]> {
        self.tables
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ToolError::MissingTable(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
