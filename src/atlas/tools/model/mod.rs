pub mod registry;
pub mod table;

use serde::Serialize;
use serde_json::Value;

pub use registry::Registry;
pub use table::{CellValue, Row, SourceTables};

/// Map category used to tag points.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub key: String,
    pub label: String,
    pub icon_id: String,
    pub color_hex: String,
    pub description: Option<String>,
}

/// Continent with the ISO codes of the countries it groups, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Continent {
    pub name: String,
    pub countries: Vec<String>,
    pub description: Option<String>,
}

/// Country owning its points in points-table row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub iso_code: String,
    pub name: String,
    pub continent: String,
    pub active: bool,
    pub overview: String,
    pub points: Vec<Point>,
}

/// Geographic marker belonging to a country.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: String,
    pub country_iso: String,
    pub title: String,
    pub category_key: String,
    pub longitude: f64,
    pub latitude: f64,
    pub description: Option<String>,
    /// Placeholder flag: the point is announced but carries no data yet.
    pub coming_soon: bool,
    /// Organization name → block, in the order the blocks were created.
    pub org_blocks: Registry<OrgBlock>,
    pub compare: Option<CompareBlock>,
}

impl Point {
    /// Returns the `[longitude, latitude]` pair used by the map.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Returns `true` when any organization block or the comparison carries
    /// real content.
    pub fn has_populated_data(&self) -> bool {
        self.org_blocks.values().any(OrgBlock::is_populated)
            || self
                .compare
                .as_ref()
                .is_some_and(|compare| !compare.metrics.is_empty())
    }
}

/// One metric of an organization block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

/// One progress entry of an organization block. The value keeps the native
/// type of the source cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEntry {
    pub label: String,
    pub value: Value,
}

/// Data one organization contributes about one point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgBlock {
    pub organization: String,
    pub summary: Option<String>,
    pub metrics: Vec<MetricEntry>,
    pub progress: Vec<ProgressEntry>,
}

impl OrgBlock {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            summary: None,
            metrics: Vec::new(),
            progress: Vec::new(),
        }
    }

    /// A block is populated when it has a summary, a metric or a progress entry.
    pub fn is_populated(&self) -> bool {
        self.summary.is_some() || !self.metrics.is_empty() || !self.progress.is_empty()
    }
}

/// One row of a two-sided comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareMetric {
    pub label: String,
    pub left: String,
    pub right: String,
}

/// Two-sided comparison attached to one point.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareBlock {
    pub left_label: String,
    pub right_label: String,
    pub summary: Option<String>,
    pub metrics: Vec<CompareMetric>,
}

impl CompareBlock {
    pub fn new(left_label: impl Into<String>, right_label: impl Into<String>) -> Self {
        Self {
            left_label: left_label.into(),
            right_label: right_label.into(),
            summary: None,
            metrics: Vec::new(),
        }
    }

    /// Display option offered next to the plain organizations.
    pub fn option_label(&self) -> String {
        format!("{} vs {}", self.left_label, self.right_label)
    }
}

/// Organizations in the order their names first appeared in the metrics and
/// progress tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationOrder {
    names: Vec<String>,
}

impl OrganizationOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` unless already known. Returns `true` on first sight.
    pub fn register(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
