//! Component D.1: validates catalog SKU metadata independent of any
//! user's translated constraints (§4.D "D.1 Governance").

use std::collections::BTreeMap;

use bloodgate_contracts::catalog::{
    reason_code, CatalogSku, CoverageReport, EvidenceTier, GovernanceOutput, SkuValidationResult, SkuValidationStatus,
};
use bloodgate_core::traits::CatalogGovernor;

const RISK_TAG_BLOCKED_INGREDIENT: &str = "blocked_ingredient";
const RISK_TAG_HEPATOTOXICITY: &str = "hepatotoxicity_risk";

pub struct MetadataGovernor {
    catalog_version: String,
}

impl MetadataGovernor {
    pub fn new(catalog_version: impl Into<String>) -> Self {
        MetadataGovernor {
            catalog_version: catalog_version.into(),
        }
    }
}

impl Default for MetadataGovernor {
    fn default() -> Self {
        MetadataGovernor::new("1.0.0")
    }
}

fn validate_one(sku: &CatalogSku) -> (Vec<String>, Vec<String>) {
    let mut reasons = Vec::new();
    let mut missing_fields = Vec::new();

    match &sku.ingredient_tags {
        None => {
            reasons.push(reason_code::INSUFFICIENT_METADATA.to_string());
            reasons.push(reason_code::MISSING_INGREDIENT_TAGS.to_string());
            missing_fields.push("ingredient_tags".to_string());
        }
        Some(tags) if tags.is_empty() => {
            reasons.push(reason_code::EMPTY_INGREDIENT_TAGS.to_string());
            missing_fields.push("ingredient_tags".to_string());
        }
        Some(_) => {}
    }

    match &sku.category_tags {
        None => {
            reasons.push(reason_code::INSUFFICIENT_METADATA.to_string());
            reasons.push(reason_code::MISSING_CATEGORY_TAGS.to_string());
            missing_fields.push("category_tags".to_string());
        }
        Some(tags) if tags.is_empty() => {
            reasons.push(reason_code::EMPTY_CATEGORY_TAGS.to_string());
            missing_fields.push("category_tags".to_string());
        }
        Some(_) => {}
    }

    if sku.evidence_tier == EvidenceTier::Blocked {
        reasons.push(reason_code::BLOCKED_BY_EVIDENCE.to_string());
    }
    if sku.risk_tags.iter().any(|t| t == RISK_TAG_BLOCKED_INGREDIENT) {
        reasons.push(reason_code::BLOCKED_BY_EVIDENCE.to_string());
    }
    if sku.risk_tags.iter().any(|t| t == RISK_TAG_HEPATOTOXICITY) {
        reasons.push(reason_code::HEPATOTOXICITY_RISK.to_string());
    }

    reasons.sort();
    reasons.dedup();
    (reasons, missing_fields)
}

impl CatalogGovernor for MetadataGovernor {
    fn validate(&self, snapshot: &[CatalogSku]) -> GovernanceOutput {
        let mut valid = Vec::new();
        let mut results = Vec::new();
        let mut missing_field_counts: BTreeMap<String, usize> = BTreeMap::new();

        for sku in snapshot {
            let (reasons, missing_fields) = validate_one(sku);
            for field in &missing_fields {
                *missing_field_counts.entry(field.clone()).or_insert(0) += 1;
            }

            let status = if reasons.is_empty() {
                valid.push(sku.clone());
                SkuValidationStatus::Valid
            } else {
                tracing::debug!(sku_id = %sku.sku_id, reasons = ?reasons, "sku auto-blocked by governance");
                SkuValidationStatus::AutoBlocked
            };

            results.push(SkuValidationResult {
                sku_id: sku.sku_id.clone(),
                product_name: sku.product_name.clone(),
                status,
                reason_codes: reasons,
                missing_fields,
            });
        }

        valid.sort_by(|a, b| a.sku_id.cmp(&b.sku_id));
        results.sort_by(|a, b| a.sku_id.cmp(&b.sku_id));

        let valid_count = results.iter().filter(|r| r.status == SkuValidationStatus::Valid).count();
        let auto_blocked_count = results.len() - valid_count;
        let results_hash = bloodgate_audit::stable_hash(&results);

        tracing::info!(
            total = results.len(),
            valid = valid_count,
            auto_blocked = auto_blocked_count,
            "catalog governance complete"
        );

        GovernanceOutput {
            valid,
            coverage: CoverageReport {
                total: results.len(),
                valid_count,
                auto_blocked_count,
                missing_field_counts,
                results_hash,
            },
            results,
        }
    }

    fn catalog_version(&self) -> &str {
        &self.catalog_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgate_contracts::catalog::GovernanceStatus;

    fn sku(sku_id: &str) -> CatalogSku {
        CatalogSku {
            sku_id: sku_id.to_string(),
            product_name: format!("product {sku_id}"),
            ingredient_tags: Some(vec!["omega3".to_string()]),
            category_tags: Some(vec!["fish_oil".to_string()]),
            risk_tags: Vec::new(),
            product_line: None,
            evidence_tier: EvidenceTier::Tier1,
            governance_status: GovernanceStatus::Active,
        }
    }

    #[test]
    fn well_formed_sku_is_valid() {
        let governor = MetadataGovernor::default();
        let out = governor.validate(&[sku("sku-1")]);
        assert_eq!(out.coverage.valid_count, 1);
        assert_eq!(out.valid.len(), 1);
    }

    #[test]
    fn missing_ingredient_tags_is_auto_blocked_with_both_reasons() {
        let governor = MetadataGovernor::default();
        let mut s = sku("sku-2");
        s.ingredient_tags = None;
        let out = governor.validate(&[s]);
        assert_eq!(out.coverage.auto_blocked_count, 1);
        let result = &out.results[0];
        assert!(result.reason_codes.contains(&reason_code::INSUFFICIENT_METADATA.to_string()));
        assert!(result.reason_codes.contains(&reason_code::MISSING_INGREDIENT_TAGS.to_string()));
        assert_eq!(result.missing_fields, vec!["ingredient_tags".to_string()]);
    }

    #[test]
    fn empty_category_tags_blocks_without_missing_prefix() {
        let governor = MetadataGovernor::default();
        let mut s = sku("sku-3");
        s.category_tags = Some(Vec::new());
        let out = governor.validate(&[s]);
        let result = &out.results[0];
        assert!(result.reason_codes.contains(&reason_code::EMPTY_CATEGORY_TAGS.to_string()));
        assert!(!result.reason_codes.contains(&reason_code::INSUFFICIENT_METADATA.to_string()));
    }

    #[test]
    fn blocked_evidence_tier_is_auto_blocked() {
        let governor = MetadataGovernor::default();
        let mut s = sku("sku-4");
        s.evidence_tier = EvidenceTier::Blocked;
        let out = governor.validate(&[s]);
        assert!(out.results[0].reason_codes.contains(&reason_code::BLOCKED_BY_EVIDENCE.to_string()));
    }

    #[test]
    fn hepatotoxicity_risk_tag_blocks_with_specific_reason() {
        let governor = MetadataGovernor::default();
        let mut s = sku("sku-5");
        s.risk_tags = vec!["hepatotoxicity_risk".to_string()];
        let out = governor.validate(&[s]);
        assert!(out.results[0].reason_codes.contains(&reason_code::HEPATOTOXICITY_RISK.to_string()));
    }

    #[test]
    fn results_are_sorted_by_sku_id() {
        let governor = MetadataGovernor::default();
        let out = governor.validate(&[sku("sku-z"), sku("sku-a")]);
        assert_eq!(out.results[0].sku_id, "sku-a");
        assert_eq!(out.results[1].sku_id, "sku-z");
    }
}
