//! `CatalogSource` implementations. The core's only suspension point is
//! loading a catalog snapshot (§5); `StaticCatalogSource` models the
//! simplest case — a snapshot already resident in memory, handed to the
//! pipeline as an `Arc` so concurrent requests share it without copying.

use std::sync::Arc;

use bloodgate_contracts::catalog::CatalogSku;
use bloodgate_contracts::error::BloodgateResult;
use bloodgate_core::traits::CatalogSource;

pub struct StaticCatalogSource {
    snapshot: Arc<Vec<CatalogSku>>,
}

impl StaticCatalogSource {
    pub fn new(snapshot: Vec<CatalogSku>) -> Self {
        StaticCatalogSource {
            snapshot: Arc::new(snapshot),
        }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn ensure_loaded(&self) -> BloodgateResult<Arc<Vec<CatalogSku>>> {
        Ok(Arc::clone(&self.snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgate_contracts::catalog::{EvidenceTier, GovernanceStatus};

    #[test]
    fn ensure_loaded_returns_the_same_arc_contents_each_call() {
        let source = StaticCatalogSource::new(vec![CatalogSku {
            sku_id: "sku-1".to_string(),
            product_name: "Omega-3".to_string(),
            ingredient_tags: Some(vec!["omega3".to_string()]),
            category_tags: Some(vec!["fish_oil".to_string()]),
            risk_tags: Vec::new(),
            product_line: None,
            evidence_tier: EvidenceTier::Tier1,
            governance_status: GovernanceStatus::Active,
        }]);
        let a = source.ensure_loaded().unwrap();
        let b = source.ensure_loaded().unwrap();
        assert_eq!(a.len(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
