//! Projects the validated entity graph into the nested `dataConfig` structure.
//!
//! Keys are emitted in insertion order (`serde_json` is built with
//! `preserve_order`), so the output order follows the source rows.

use serde_json::{Map, Value, json};

use crate::atlas::tools::error::Result;
use crate::atlas::tools::merge::CompareBlocks;
use crate::atlas::tools::model::{
    Category, CompareBlock, Continent, Country, OrgBlock, OrganizationOrder, Point, Registry,
};

/// Everything the renderer needs: the organization selector options and the
/// nested data configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBundle {
    pub org_options: Vec<String>,
    pub data_config: Value,
}

/// Discovered organizations followed by each comparison's
/// `"<left> vs <right>"` label, without repeats.
pub fn organization_options(
    organizations: &OrganizationOrder,
    compares: &CompareBlocks,
) -> Vec<String> {
    let mut options: Vec<String> = organizations.as_slice().to_vec();
    for compare in compares.values() {
        let label = compare.option_label();
        if !options.contains(&label) {
            options.push(label);
        }
    }
    options
}

/// Builds the `categories` / `continents` / `countries` mapping.
pub fn assemble_data_config(
    categories: &Registry<Category>,
    continents: &Registry<Continent>,
    countries: &Registry<Country>,
    organizations: &OrganizationOrder,
) -> Result<Value> {
    let categories: Map<String, Value> = categories
        .iter()
        .map(|(key, category)| (key.to_string(), category_record(category)))
        .collect();
    let continents: Map<String, Value> = continents
        .iter()
        .map(|(name, continent)| (name.to_string(), continent_record(continent)))
        .collect();
    let mut country_map = Map::new();
    for (iso, country) in countries.iter() {
        country_map.insert(iso.to_string(), country_record(country, organizations)?);
    }

    Ok(json!({
        "categories": categories,
        "continents": continents,
        "countries": country_map,
    }))
}

fn category_record(category: &Category) -> Value {
    let mut record = Map::new();
    record.insert("label".into(), json!(category.label));
    record.insert("iconId".into(), json!(category.icon_id));
    record.insert("color".into(), json!(category.color_hex));
    if let Some(description) = &category.description {
        record.insert("description".into(), json!(description));
    }
    Value::Object(record)
}

fn continent_record(continent: &Continent) -> Value {
    let mut record = Map::new();
    record.insert("countries".into(), json!(continent.countries));
    if let Some(description) = &continent.description {
        record.insert("description".into(), json!(description));
    }
    Value::Object(record)
}

fn country_record(country: &Country, organizations: &OrganizationOrder) -> Result<Value> {
    let points = country
        .points
        .iter()
        .map(|point| point_record(point, organizations))
        .collect::<Result<Vec<_>>>()?;
    Ok(json!({
        "name": country.name,
        "continent": country.continent,
        "active": country.active,
        "overview": country.overview,
        "points": points,
    }))
}

fn point_record(point: &Point, organizations: &OrganizationOrder) -> Result<Value> {
    let mut record = Map::new();
    record.insert("id".into(), json!(point.id));
    record.insert("title".into(), json!(point.title));
    record.insert("category".into(), json!(point.category_key));
    record.insert("coordinates".into(), json!(point.coordinates()));
    if let Some(description) = &point.description {
        record.insert("description".into(), json!(description));
    }

    if point.coming_soon {
        record.insert("comingSoon".into(), Value::Bool(true));
        return Ok(Value::Object(record));
    }

    if !point.org_blocks.is_empty() || point.compare.is_some() {
        let mut data = Map::new();
        for organization in organizations.iter() {
            let block = match point.org_blocks.get(organization) {
                Some(block) => org_block_record(block)?,
                None => Value::Null,
            };
            data.insert(organization.to_string(), block);
        }
        let compare = match &point.compare {
            Some(compare) => compare_record(compare)?,
            None => Value::Null,
        };
        data.insert("compare".into(), compare);
        record.insert("data".into(), Value::Object(data));
    }

    Ok(Value::Object(record))
}

/// `null` when the block carries nothing.
fn org_block_record(block: &OrgBlock) -> Result<Value> {
    let mut record = Map::new();
    if let Some(summary) = &block.summary {
        record.insert("summary".into(), json!(summary));
    }
    if !block.metrics.is_empty() {
        record.insert("metrics".into(), serde_json::to_value(&block.metrics)?);
    }
    if !block.progress.is_empty() {
        record.insert("progress".into(), serde_json::to_value(&block.progress)?);
    }
    if record.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(record))
    }
}

/// `null` when the comparison has no metrics.
fn compare_record(compare: &CompareBlock) -> Result<Value> {
    if compare.metrics.is_empty() {
        return Ok(Value::Null);
    }
    let mut record = Map::new();
    record.insert("leftLabel".into(), json!(compare.left_label));
    record.insert("rightLabel".into(), json!(compare.right_label));
    if let Some(summary) = &compare.summary {
        record.insert("summary".into(), json!(summary));
    }
    record.insert("metrics".into(), serde_json::to_value(&compare.metrics)?);
    Ok(Value::Object(record))
}
