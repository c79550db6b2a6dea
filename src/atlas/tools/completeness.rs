use crate::atlas::tools::error::ValidationErrors;
use crate::atlas::tools::model::{OrganizationOrder, Point, Registry};

/// Every regular point needs a block for every known organization, and a
/// placeholder point must not carry any populated data.
pub fn check_completeness(
    points: &Registry<Point>,
    organizations: &OrganizationOrder,
    errors: &mut ValidationErrors,
) {
    for point in points.values() {
        if point.coming_soon {
            if point.has_populated_data() {
                errors.push(format!(
                    "point '{}' is marked as coming soon but carries data",
                    point.id
                ));
            }
            continue;
        }

        let mut missing: Vec<&str> = organizations
            .iter()
            .filter(|organization| !point.org_blocks.contains_key(organization))
            .collect();
        if missing.is_empty() {
            continue;
        }
        missing.sort_unstable();
        errors.push(format!(
            "point '{}' is missing organization data for: {}",
            point.id,
            missing.join(", ")
        ));
    }
}
