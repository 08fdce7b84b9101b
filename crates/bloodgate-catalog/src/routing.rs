//! Component D.2: pure safety elimination over governance-valid SKUs
//! (§4.D "D.2 Routing"). Never adds a SKU; only removes or annotates one.

use std::collections::BTreeSet;

use bloodgate_contracts::catalog::{AllowedSku, BlockSource, BlockedSku, CatalogSku, RoutingAudit, RoutingOutput};
use bloodgate_contracts::constraint::TranslatedConstraints;
use bloodgate_core::traits::Router;

use crate::requirements_coverage;

const RISK_TAG_AUTO_BLOCKED: &str = "auto_blocked";

pub struct SafetyRouter {
    routing_version: String,
}

impl SafetyRouter {
    pub fn new(routing_version: impl Into<String>) -> Self {
        SafetyRouter {
            routing_version: routing_version.into(),
        }
    }
}

impl Default for SafetyRouter {
    fn default() -> Self {
        SafetyRouter::new("1.0.0")
    }
}

fn lower_set(tags: &Option<Vec<String>>) -> BTreeSet<String> {
    tags.iter().flatten().map(|t| t.to_ascii_lowercase()).collect()
}

fn sorted_vec(set: BTreeSet<String>) -> Vec<String> {
    set.into_iter().collect()
}

impl Router for SafetyRouter {
    fn route(&self, valid_skus: &[CatalogSku], constraints: &TranslatedConstraints, requirements: &[String]) -> RoutingOutput {
        let blocked_ingredients: BTreeSet<String> = constraints.blocked_ingredients.iter().map(|s| s.to_ascii_lowercase()).collect();
        let blocked_categories: BTreeSet<String> = constraints.blocked_categories.iter().map(|s| s.to_ascii_lowercase()).collect();
        let caution_flags: BTreeSet<String> = constraints.caution_flags.iter().map(|s| s.to_ascii_lowercase()).collect();
        let requirements_lower: BTreeSet<String> = requirements.iter().map(|s| s.to_ascii_lowercase()).collect();

        let mut allowed = Vec::new();
        let mut blocked = Vec::new();
        let mut blocked_by_blood = 0usize;
        let mut blocked_by_metadata = 0usize;
        let mut blocked_by_category = 0usize;
        let mut caution_count = 0usize;
        let mut constraints_applied: BTreeSet<String> = BTreeSet::new();

        for sku in valid_skus {
            let ingredient_tags = lower_set(&sku.ingredient_tags);
            let category_tags = lower_set(&sku.category_tags);

            let metadata_block = sku.risk_tags.iter().any(|t| t == RISK_TAG_AUTO_BLOCKED);

            let blood_block: BTreeSet<String> = blocked_ingredients.intersection(&ingredient_tags).cloned().collect();
            let category_block: BTreeSet<String> = blocked_categories.intersection(&category_tags).cloned().collect();

            if metadata_block || !blood_block.is_empty() || !category_block.is_empty() {
                let mut reasons = Vec::new();
                if metadata_block {
                    reasons.push("AUTO_BLOCKED_METADATA".to_string());
                }
                for tag in &blood_block {
                    reasons.push(format!("BLOCK_INGREDIENT_{}", tag.to_ascii_uppercase()));
                    constraints_applied.insert(format!("BLOCK_INGREDIENT_{}", tag.to_ascii_uppercase()));
                }
                for tag in &category_block {
                    reasons.push(format!("BLOCK_CATEGORY_{}", tag.to_ascii_uppercase()));
                    constraints_applied.insert(format!("BLOCK_CATEGORY_{}", tag.to_ascii_uppercase()));
                }
                reasons.sort();
                reasons.dedup();

                // Primary source: metadata > blood > category.
                let blocked_by = if metadata_block {
                    blocked_by_metadata += 1;
                    BlockSource::Metadata
                } else if !blood_block.is_empty() {
                    blocked_by_blood += 1;
                    BlockSource::Blood
                } else {
                    blocked_by_category += 1;
                    BlockSource::Category
                };

                tracing::debug!(sku_id = %sku.sku_id, blocked_by = ?blocked_by, reasons = ?reasons, "sku blocked at routing");

                blocked.push(BlockedSku {
                    sku_id: sku.sku_id.clone(),
                    product_name: sku.product_name.clone(),
                    reason_codes: reasons,
                    blocked_by,
                    blocked_ingredients: sorted_vec(blood_block),
                    blocked_categories: sorted_vec(category_block),
                });
                continue;
            }

            let caution_matches: BTreeSet<String> = caution_flags.intersection(&ingredient_tags).cloned().collect();
            let caution_reasons: Vec<String> = caution_matches.iter().map(|f| format!("CAUTION_{}", f.to_ascii_uppercase())).collect();
            let fulfills: BTreeSet<String> = requirements_lower.intersection(&ingredient_tags).cloned().collect();

            if !caution_matches.is_empty() {
                caution_count += 1;
            }

            let mut caution_reasons = caution_reasons;
            caution_reasons.sort();

            allowed.push(AllowedSku {
                sku_id: sku.sku_id.clone(),
                product_name: sku.product_name.clone(),
                ingredient_tags: sorted_vec(ingredient_tags),
                category_tags: sorted_vec(category_tags),
                product_line: sku.product_line,
                evidence_tier: sku.evidence_tier,
                caution_flags: sorted_vec(caution_matches),
                caution_reasons,
                fulfills_requirements: sorted_vec(fulfills),
            });
        }

        allowed.sort_by(|a, b| a.sku_id.cmp(&b.sku_id));
        blocked.sort_by(|a, b| a.sku_id.cmp(&b.sku_id));

        let allowed_ids: Vec<String> = allowed.iter().map(|s| s.sku_id.clone()).collect();
        let blocked_ids: Vec<String> = blocked.iter().map(|s| s.sku_id.clone()).collect();
        let routing_hash = bloodgate_audit::stable_hash(&(&allowed_ids, &blocked_ids));

        let (requirements_in_catalog, requirements_missing) = requirements_coverage(&allowed, requirements);

        tracing::info!(
            allowed = allowed.len(),
            blocked = blocked.len(),
            "routing stage complete"
        );

        RoutingOutput {
            audit: RoutingAudit {
                total_input_skus: valid_skus.len(),
                allowed_count: allowed.len(),
                blocked_count: blocked.len(),
                blocked_by_blood,
                blocked_by_metadata,
                blocked_by_category,
                constraints_applied: sorted_vec(constraints_applied),
                requirements_in_catalog,
                requirements_missing,
                caution_count,
            },
            allowed,
            blocked,
            routing_hash,
        }
    }

    fn routing_version(&self) -> &str {
        &self.routing_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgate_contracts::catalog::{EvidenceTier, GovernanceStatus};

    fn sku(sku_id: &str, ingredients: &[&str], categories: &[&str], risk_tags: &[&str]) -> CatalogSku {
        CatalogSku {
            sku_id: sku_id.to_string(),
            product_name: format!("product {sku_id}"),
            ingredient_tags: Some(ingredients.iter().map(|s| s.to_string()).collect()),
            category_tags: Some(categories.iter().map(|s| s.to_string()).collect()),
            risk_tags: risk_tags.iter().map(|s| s.to_string()).collect(),
            product_line: None,
            evidence_tier: EvidenceTier::Tier1,
            governance_status: GovernanceStatus::Active,
        }
    }

    fn constraints_with(blocked_ingredients: &[&str]) -> TranslatedConstraints {
        TranslatedConstraints {
            blocked_ingredients: blocked_ingredients.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn sku_with_blocked_ingredient_is_blocked_with_blood_source() {
        let router = SafetyRouter::default();
        let skus = vec![sku("sku-1", &["iron_bisglycinate"], &["minerals"], &[])];
        let out = router.route(&skus, &constraints_with(&["iron_bisglycinate"]), &[]);
        assert!(out.allowed.is_empty());
        assert_eq!(out.blocked.len(), 1);
        assert_eq!(out.blocked[0].blocked_by, BlockSource::Blood);
        assert_eq!(out.audit.blocked_by_blood, 1);
    }

    #[test]
    fn metadata_block_takes_priority_over_blood() {
        let router = SafetyRouter::default();
        let skus = vec![sku("sku-1", &["iron_bisglycinate"], &["minerals"], &["auto_blocked"])];
        let out = router.route(&skus, &constraints_with(&["iron_bisglycinate"]), &[]);
        assert_eq!(out.blocked[0].blocked_by, BlockSource::Metadata);
        assert!(out.blocked[0].reason_codes.contains(&"AUTO_BLOCKED_METADATA".to_string()));
    }

    #[test]
    fn unaffected_sku_is_allowed_and_fulfills_requirement() {
        let router = SafetyRouter::default();
        let skus = vec![sku("sku-1", &["omega3", "epa_dha"], &["fish_oil"], &[])];
        let out = router.route(&skus, &constraints_with(&[]), &["omega3".to_string()]);
        assert_eq!(out.allowed.len(), 1);
        assert_eq!(out.allowed[0].fulfills_requirements, vec!["omega3".to_string()]);
        assert_eq!(out.audit.requirements_in_catalog, vec!["omega3".to_string()]);
        assert!(out.audit.requirements_missing.is_empty());
    }

    #[test]
    fn allowed_and_blocked_lists_are_sorted_by_sku_id() {
        let router = SafetyRouter::default();
        let skus = vec![
            sku("sku-z", &["omega3"], &["fish_oil"], &[]),
            sku("sku-a", &["omega3"], &["fish_oil"], &[]),
        ];
        let out = router.route(&skus, &constraints_with(&[]), &[]);
        assert_eq!(out.allowed[0].sku_id, "sku-a");
        assert_eq!(out.allowed[1].sku_id, "sku-z");
    }

    #[test]
    fn missing_requirement_is_reported() {
        let router = SafetyRouter::default();
        let skus = vec![sku("sku-1", &["omega3"], &["fish_oil"], &[])];
        let out = router.route(&skus, &constraints_with(&[]), &["zinc".to_string()]);
        assert_eq!(out.audit.requirements_missing, vec!["zinc".to_string()]);
    }
}
