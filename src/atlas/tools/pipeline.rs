use tracing::{info, instrument};

use crate::atlas::tools::assemble::{DataBundle, assemble_data_config, organization_options};
use crate::atlas::tools::completeness::check_completeness;
use crate::atlas::tools::error::{Result, ValidationErrors};
use crate::atlas::tools::links::validate_continent_links;
use crate::atlas::tools::merge::{
    link_blocks, merge_org_compare, merge_org_metrics, merge_org_progress,
};
use crate::atlas::tools::model::table::{
    CATEGORIES, CONTINENTS, COUNTRIES, ORG_COMPARE, ORG_METRICS, ORG_PROGRESS, POINTS,
};
use crate::atlas::tools::model::{OrganizationOrder, SourceTables};
use crate::atlas::tools::parse::{
    attach_points, parse_categories, parse_continents, parse_countries, parse_points,
};

/// Validates the source tables and builds the data bundle.
///
/// A missing table aborts immediately. Every other problem is collected over
/// the whole pass and returned together as
/// [`ToolError::Validation`](crate::ToolError::Validation); no bundle is
/// produced in that case.
#[instrument(level = "info", skip_all)]
pub fn build_data(tables: &SourceTables) -> Result<DataBundle> {
    let category_rows = tables.table(CATEGORIES)?;
    let continent_rows = tables.table(CONTINENTS)?;
    let country_rows = tables.table(COUNTRIES)?;
    let point_rows = tables.table(POINTS)?;
    let metric_rows = tables.table(ORG_METRICS)?;
    let progress_rows = tables.table(ORG_PROGRESS)?;
    let compare_rows = tables.table(ORG_COMPARE)?;

    let mut errors = ValidationErrors::new();

    let categories = parse_categories(category_rows, &mut errors);
    let continents = parse_continents(continent_rows, &mut errors);
    let mut countries = parse_countries(country_rows, &continents, &mut errors);
    let mut points = parse_points(point_rows, &categories, &countries, &mut errors);
    validate_continent_links(&continents, &countries, &mut errors);

    let mut organizations = OrganizationOrder::new();
    let mut blocks = merge_org_metrics(metric_rows, &points, &mut organizations, &mut errors);
    merge_org_progress(
        progress_rows,
        &points,
        &mut blocks,
        &mut organizations,
        &mut errors,
    );
    let compares = merge_org_compare(compare_rows, &points, &mut errors);
    let org_options = organization_options(&organizations, &compares);

    link_blocks(&mut points, blocks, compares);
    check_completeness(&points, &organizations, &mut errors);

    errors.into_result()?;

    attach_points(&mut countries, points);
    let data_config = assemble_data_config(&categories, &continents, &countries, &organizations)?;
    info!(
        categories = categories.len(),
        countries = countries.len(),
        organizations = organizations.len(),
        "data configuration assembled"
    );

    Ok(DataBundle {
        org_options,
        data_config,
    })
}
