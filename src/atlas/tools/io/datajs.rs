use std::fs;
use std::path::Path;

use crate::atlas::tools::assemble::DataBundle;
use crate::atlas::tools::error::{Result, ToolError};

/// First line of every generated artifact.
pub const GENERATED_BANNER: &str = "// Auto-generated by atlas-tools – DO NOT EDIT";

/// Renders the bundle as the `data.js` module consumed by the map front end.
/// JSON is pretty-printed with two-space indentation and non-ASCII text is
/// kept verbatim.
pub fn render_datajs(bundle: &DataBundle) -> Result<String> {
    let org_options = serde_json::to_string_pretty(&bundle.org_options)?;
    let data_config = serde_json::to_string_pretty(&bundle.data_config)?;
    let lines = [
        GENERATED_BANNER.to_string(),
        format!("const ORG_OPTIONS = {org_options};"),
        String::new(),
        format!("const DATA_CONFIG = {data_config};"),
        String::new(),
        "const COUNTRY_BY_ISO = new Map(Object.entries(DATA_CONFIG.countries));".to_string(),
        "const CONTINENT_LIST = Object.keys(DATA_CONFIG.continents);".to_string(),
        String::new(),
    ];
    Ok(lines.join("\n"))
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let to_output_error = |source: std::io::Error| ToolError::Output {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_output_error)?;
    }
    fs::write(path, content).map_err(to_output_error)
}
