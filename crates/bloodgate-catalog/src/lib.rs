//! Component D: catalog metadata governance (D.1) and constraint-safe
//! routing (D.2) over a catalog snapshot (§4.D).

mod governance;
mod routing;
mod source;

pub use governance::MetadataGovernor;
pub use routing::SafetyRouter;
pub use source::StaticCatalogSource;

use std::collections::BTreeSet;

use bloodgate_contracts::catalog::AllowedSku;

/// Reports which of `requirements` have at least one allowed SKU carrying
/// that tag. Exposed standalone (not only as `RoutingAudit` fields) because
/// §4.E and external diagnostics both need it independent of a full route.
pub fn requirements_coverage(allowed: &[AllowedSku], requirements: &[String]) -> (Vec<String>, Vec<String>) {
    let carried: BTreeSet<String> = allowed.iter().flat_map(|sku| sku.ingredient_tags.iter().cloned()).collect();

    let mut in_catalog = Vec::new();
    let mut missing = Vec::new();
    let mut seen = BTreeSet::new();
    for req in requirements {
        let req = req.to_ascii_lowercase();
        if !seen.insert(req.clone()) {
            continue;
        }
        if carried.contains(&req) {
            in_catalog.push(req);
        } else {
            missing.push(req);
        }
    }
    in_catalog.sort();
    missing.sort();
    (in_catalog, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgate_contracts::catalog::{EvidenceTier, ProductLine};

    fn allowed(sku_id: &str, tags: &[&str]) -> AllowedSku {
        AllowedSku {
            sku_id: sku_id.to_string(),
            product_name: sku_id.to_string(),
            ingredient_tags: tags.iter().map(|s| s.to_string()).collect(),
            category_tags: Vec::new(),
            product_line: Some(ProductLine::Male),
            evidence_tier: EvidenceTier::Tier1,
            caution_flags: Vec::new(),
            caution_reasons: Vec::new(),
            fulfills_requirements: Vec::new(),
        }
    }

    #[test]
    fn reports_covered_and_missing_requirements() {
        let allowed_skus = vec![allowed("sku-1", &["omega3", "zinc"])];
        let (in_catalog, missing) = requirements_coverage(&allowed_skus, &["omega3".to_string(), "magnesium".to_string()]);
        assert_eq!(in_catalog, vec!["omega3".to_string()]);
        assert_eq!(missing, vec!["magnesium".to_string()]);
    }

    #[test]
    fn duplicate_requirements_are_deduplicated() {
        let allowed_skus = vec![allowed("sku-1", &["omega3"])];
        let (in_catalog, missing) = requirements_coverage(&allowed_skus, &["omega3".to_string(), "OMEGA3".to_string()]);
        assert_eq!(in_catalog, vec!["omega3".to_string()]);
        assert!(missing.is_empty());
    }
}
