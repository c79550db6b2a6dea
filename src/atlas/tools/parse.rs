//! Entity parsers for the categories, continents, countries and points tables.

use tracing::debug;

use crate::atlas::tools::error::ValidationErrors;
use crate::atlas::tools::model::table::{CATEGORIES, CONTINENTS, COUNTRIES, POINTS};
use crate::atlas::tools::model::{Category, Continent, Country, Point, Registry, Row};
use crate::atlas::tools::normalize::{bool_field, float_field, require_field, text};

/// Parses the categories table. Duplicate keys keep the first row.
pub fn parse_categories(rows: &[Row], errors: &mut ValidationErrors) -> Registry<Category> {
    let mut categories = Registry::new();
    for row in rows {
        let Some(key) = require_field(row, "category_key", CATEGORIES, errors) else {
            continue;
        };
        if categories.contains_key(&key) {
            errors.push(format!("category key '{key}' is duplicated"));
            continue;
        }
        let context = format!("category '{key}'");
        let label = require_field(row, "label", &context, errors).unwrap_or_default();
        let icon_id = require_field(row, "icon_id", &context, errors).unwrap_or_default();
        let color_hex = require_field(row, "color_hex", &context, errors).unwrap_or_default();
        let category = Category {
            key: key.clone(),
            label,
            icon_id,
            color_hex,
            description: text(row, "description"),
        };
        categories.insert(key, category);
    }
    debug!(count = categories.len(), "parsed categories");
    categories
}

/// Parses the continents table. `country_iso_list` is a comma separated list
/// of ISO codes; empty items are ignored.
pub fn parse_continents(rows: &[Row], errors: &mut ValidationErrors) -> Registry<Continent> {
    let mut continents = Registry::new();
    for row in rows {
        let Some(name) = require_field(row, "continent_name", CONTINENTS, errors) else {
            continue;
        };
        if continents.contains_key(&name) {
            errors.push(format!("continent '{name}' is listed more than once"));
            continue;
        }
        let context = format!("continent '{name}'");
        let iso_list = require_field(row, "country_iso_list", &context, errors).unwrap_or_default();
        let countries = iso_list
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();
        let continent = Continent {
            name: name.clone(),
            countries,
            description: text(row, "description"),
        };
        continents.insert(name, continent);
    }
    debug!(count = continents.len(), "parsed continents");
    continents
}

/// Parses the countries table, checking each continent reference.
pub fn parse_countries(
    rows: &[Row],
    continents: &Registry<Continent>,
    errors: &mut ValidationErrors,
) -> Registry<Country> {
    let mut countries = Registry::new();
    for row in rows {
        let Some(iso) = require_field(row, "country_iso3", COUNTRIES, errors) else {
            continue;
        };
        if countries.contains_key(&iso) {
            errors.push(format!("country with ISO code '{iso}' is duplicated"));
            continue;
        }
        let context = format!("country '{iso}'");
        let name = require_field(row, "name", &context, errors).unwrap_or_default();
        let continent = require_field(row, "continent_name", &context, errors).unwrap_or_default();
        if !continent.is_empty() && !continents.contains_key(&continent) {
            errors.push(format!(
                "country '{iso}' references unknown continent '{continent}'"
            ));
        }
        let active = bool_field(row, "active_flag", &context, false, errors);
        let country = Country {
            iso_code: iso.clone(),
            name,
            continent,
            active,
            overview: text(row, "overview").unwrap_or_default(),
            points: Vec::new(),
        };
        countries.insert(iso, country);
    }
    debug!(count = countries.len(), "parsed countries");
    countries
}

/// Parses the points table.
///
/// A point whose country code does not resolve is dropped; an unknown
/// category is reported but the point is kept. Points are returned in row
/// order and are handed to their countries once the organization data has
/// been linked.
pub fn parse_points(
    rows: &[Row],
    categories: &Registry<Category>,
    countries: &Registry<Country>,
    errors: &mut ValidationErrors,
) -> Registry<Point> {
    let mut points = Registry::new();
    for row in rows {
        let Some(id) = require_field(row, "point_id", POINTS, errors) else {
            continue;
        };
        if points.contains_key(&id) {
            errors.push(format!("point id '{id}' is duplicated"));
            continue;
        }
        let context = format!("point '{id}'");
        let country_iso = require_field(row, "country_iso3", &context, errors).unwrap_or_default();
        if !country_iso.is_empty() && !countries.contains_key(&country_iso) {
            errors.push(format!(
                "point '{id}' references unknown country '{country_iso}'"
            ));
            continue;
        }
        let title = require_field(row, "title", &context, errors).unwrap_or_default();
        let category_key = require_field(row, "category_key", &context, errors).unwrap_or_default();
        if !category_key.is_empty() && !categories.contains_key(&category_key) {
            errors.push(format!(
                "point '{id}' references unknown category '{category_key}'"
            ));
        }
        let longitude = float_field(row, "longitude", &context, errors);
        let latitude = float_field(row, "latitude", &context, errors);
        let coming_soon = bool_field(row, "coming_soon_flag", &context, false, errors);
        let point = Point {
            id: id.clone(),
            country_iso,
            title,
            category_key,
            longitude,
            latitude,
            description: text(row, "description"),
            coming_soon,
            org_blocks: Registry::new(),
            compare: None,
        };
        points.insert(id, point);
    }
    debug!(count = points.len(), "parsed points");
    points
}

/// Moves every point into the point list of its owning country, keeping the
/// points-table row order. Points without a known country stay unowned.
pub fn attach_points(countries: &mut Registry<Country>, points: Registry<Point>) {
    for (_, point) in points {
        if let Some(country) = countries.get_mut(&point.country_iso) {
            country.points.push(point);
        }
    }
}
