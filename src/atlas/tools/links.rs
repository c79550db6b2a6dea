use std::collections::HashSet;

use crate::atlas::tools::error::ValidationErrors;
use crate::atlas::tools::model::{Continent, Country, Registry};

/// Checks that continents and countries cover each other: every listed ISO
/// code must be a known country, and every country must appear in at least
/// one continent list.
///
/// A country listed under two continents is not reported.
pub fn validate_continent_links(
    continents: &Registry<Continent>,
    countries: &Registry<Country>,
    errors: &mut ValidationErrors,
) {
    let mut assigned: HashSet<&str> = HashSet::new();
    for continent in continents.values() {
        for iso in &continent.countries {
            if !countries.contains_key(iso) {
                errors.push(format!(
                    "continent '{}' contains unknown ISO code '{iso}'",
                    continent.name
                ));
            }
            assigned.insert(iso.as_str());
        }
    }

    for iso in countries.keys() {
        if !assigned.contains(iso) {
            errors.push(format!("country '{iso}' is not assigned to any continent"));
        }
    }
}
