//! Merges the organization-scoped tables onto the parsed points.
//!
//! `org_metrics` and `org_progress` accrete into one [`OrgBlock`] per
//! (point, organization) pair. `org_compare` builds an independent
//! [`CompareBlock`] per point.

use tracing::debug;

use crate::atlas::tools::error::ValidationErrors;
use crate::atlas::tools::model::table::{ORG_COMPARE, ORG_METRICS, ORG_PROGRESS};
use crate::atlas::tools::model::{
    CompareBlock, CompareMetric, MetricEntry, OrgBlock, OrganizationOrder, Point, ProgressEntry,
    Registry, Row,
};
use crate::atlas::tools::normalize::{cell_json, cell_text, present, require_field, text};

/// Point id → organization → block, both levels in first-seen order.
pub type PointBlocks = Registry<Registry<OrgBlock>>;

/// Point id → comparison, in first-seen order.
pub type CompareBlocks = Registry<CompareBlock>;

/// A candidate summary that differs from the one already stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConflict {
    pub existing: String,
    pub candidate: String,
}

/// First write wins: stores `candidate` when `holder` is empty, accepts an
/// identical candidate, and reports a different one as a conflict without
/// overwriting.
pub fn merge_summary(
    holder: &mut Option<String>,
    candidate: Option<String>,
) -> Result<(), SummaryConflict> {
    let Some(candidate) = candidate else {
        return Ok(());
    };
    match holder {
        Some(existing) if *existing != candidate => Err(SummaryConflict {
            existing: existing.clone(),
            candidate,
        }),
        Some(_) => Ok(()),
        None => {
            *holder = Some(candidate);
            Ok(())
        }
    }
}

/// Resolves the point and organization of an organization-scoped row and
/// registers the organization on first sight.
fn resolve_org_row(
    row: &Row,
    table: &str,
    points: &Registry<Point>,
    organizations: &mut OrganizationOrder,
    errors: &mut ValidationErrors,
) -> Option<(String, String)> {
    let point_id = require_field(row, "point_id", table, errors)?;
    if !points.contains_key(&point_id) {
        errors.push(format!("{table}: unknown point '{point_id}'"));
        return None;
    }
    let organization =
        require_field(row, "organization", &format!("{table} for '{point_id}'"), errors)?;
    organizations.register(&organization);
    Some((point_id, organization))
}

fn block_for<'a>(
    blocks: &'a mut PointBlocks,
    point_id: &str,
    organization: &str,
) -> &'a mut OrgBlock {
    blocks
        .get_or_insert_with(point_id, Registry::new)
        .get_or_insert_with(organization, || OrgBlock::new(organization))
}

/// Consumes the `org_metrics` table.
pub fn merge_org_metrics(
    rows: &[Row],
    points: &Registry<Point>,
    organizations: &mut OrganizationOrder,
    errors: &mut ValidationErrors,
) -> PointBlocks {
    let mut blocks = PointBlocks::new();
    for row in rows {
        let Some((point_id, organization)) =
            resolve_org_row(row, ORG_METRICS, points, organizations, errors)
        else {
            continue;
        };
        let block = block_for(&mut blocks, &point_id, &organization);

        if merge_summary(&mut block.summary, text(row, "summary")).is_err() {
            errors.push(format!(
                "{ORG_METRICS}: contradictory summary for point '{point_id}', organization '{organization}'"
            ));
        }

        let label = text(row, "metric_label");
        let value = present(row, "metric_value");
        let trend = text(row, "metric_trend");
        if label.is_none() && value.is_none() && trend.is_none() {
            continue;
        }
        match (label, value) {
            (Some(label), Some(value)) => block.metrics.push(MetricEntry {
                label,
                value: cell_text(value),
                trend,
            }),
            _ => errors.push(format!(
                "{ORG_METRICS}: incomplete metric for point '{point_id}', organization '{organization}'"
            )),
        }
    }
    debug!(points = blocks.len(), "merged org_metrics");
    blocks
}

/// Consumes the `org_progress` table into the blocks created by
/// [`merge_org_metrics`], creating missing blocks lazily.
pub fn merge_org_progress(
    rows: &[Row],
    points: &Registry<Point>,
    blocks: &mut PointBlocks,
    organizations: &mut OrganizationOrder,
    errors: &mut ValidationErrors,
) {
    for row in rows {
        let Some((point_id, organization)) =
            resolve_org_row(row, ORG_PROGRESS, points, organizations, errors)
        else {
            continue;
        };
        let block = block_for(blocks, &point_id, &organization);

        if merge_summary(&mut block.summary, text(row, "summary")).is_err() {
            errors.push(format!(
                "{ORG_PROGRESS}: summary for point '{point_id}', organization '{organization}' disagrees with {ORG_METRICS}"
            ));
        }

        let label = text(row, "progress_label");
        let value = present(row, "progress_value");
        match (label, value) {
            (None, None) => {}
            (Some(label), Some(value)) => block.progress.push(ProgressEntry {
                label,
                value: cell_json(value),
            }),
            _ => errors.push(format!(
                "{ORG_PROGRESS}: incomplete progress entry for point '{point_id}', organization '{organization}'"
            )),
        }
    }
    debug!(points = blocks.len(), "merged org_progress");
}

/// Consumes the `org_compare` table. The first row of a point fixes its
/// left/right labels.
pub fn merge_org_compare(
    rows: &[Row],
    points: &Registry<Point>,
    errors: &mut ValidationErrors,
) -> CompareBlocks {
    let mut compares = CompareBlocks::new();
    for row in rows {
        let Some(point_id) = require_field(row, "point_id", ORG_COMPARE, errors) else {
            continue;
        };
        if !points.contains_key(&point_id) {
            errors.push(format!("{ORG_COMPARE}: unknown point '{point_id}'"));
            continue;
        }
        let context = format!("{ORG_COMPARE} for '{point_id}'");
        let left_label = require_field(row, "left_label", &context, errors);
        let right_label = require_field(row, "right_label", &context, errors);
        let (Some(left_label), Some(right_label)) = (left_label, right_label) else {
            continue;
        };

        let block = compares.get_or_insert_with(&point_id, || {
            CompareBlock::new(left_label.clone(), right_label.clone())
        });
        if block.left_label != left_label || block.right_label != right_label {
            errors.push(format!(
                "{ORG_COMPARE}: inconsistent comparison labels for point '{point_id}'"
            ));
        }

        if merge_summary(&mut block.summary, text(row, "summary")).is_err() {
            errors.push(format!(
                "{ORG_COMPARE}: contradictory summary for point '{point_id}'"
            ));
        }

        let label = text(row, "metric_label");
        let left = present(row, "left_value");
        let right = present(row, "right_value");
        match (label, left, right) {
            (None, None, None) => {}
            (Some(label), Some(left), Some(right)) => block.metrics.push(CompareMetric {
                label,
                left: cell_text(left),
                right: cell_text(right),
            }),
            _ => errors.push(format!(
                "{ORG_COMPARE}: incomplete comparison metric for point '{point_id}'"
            )),
        }
    }
    debug!(points = compares.len(), "merged org_compare");
    compares
}

/// Hands the merged blocks to their points.
pub fn link_blocks(points: &mut Registry<Point>, blocks: PointBlocks, compares: CompareBlocks) {
    for (point_id, org_blocks) in blocks {
        if let Some(point) = points.get_mut(&point_id) {
            point.org_blocks = org_blocks;
        }
    }
    for (point_id, compare) in compares {
        if let Some(point) = points.get_mut(&point_id) {
            point.compare = Some(compare);
        }
    }
}
