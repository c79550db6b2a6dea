use std::path::Path;

use tracing::{debug, info, instrument};

use crate::atlas::tools::assemble::DataBundle;
use crate::atlas::tools::error::Result;
use crate::atlas::tools::io::excel_write::{template_tables, write_workbook};
use crate::atlas::tools::io::{TableSource, datajs, load_tables};
use crate::atlas::tools::pipeline::build_data;

/// Loads and validates the source tables without writing anything.
#[instrument(level = "info", skip_all, fields(source = %source))]
pub fn check_source(source: &TableSource) -> Result<DataBundle> {
    let tables = load_tables(source)?;
    info!("source tables read from {source}");
    let bundle = build_data(&tables)?;
    debug!(org_options = bundle.org_options.len(), "validation passed");
    Ok(bundle)
}

/// Loads and validates the source tables and writes the `data.js` artifact.
#[instrument(
    level = "info",
    skip_all,
    fields(source = %source, output = %output.display())
)]
pub fn convert_to_datajs(source: &TableSource, output: &Path) -> Result<DataBundle> {
    let bundle = check_source(source)?;
    let content = datajs::render_datajs(&bundle)?;
    debug!(bytes = content.len(), "artifact rendered");
    datajs::write_output(output, &content)?;
    info!("wrote {}", output.display());
    Ok(bundle)
}

/// Writes an empty workbook carrying every required sheet and header row.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn write_template(output: &Path) -> Result<()> {
    let tables = template_tables();
    write_workbook(output, &tables)?;
    info!(sheets = tables.len(), "template workbook written");
    Ok(())
}
