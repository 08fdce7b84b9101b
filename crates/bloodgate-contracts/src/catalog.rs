//! Catalog SKUs and the outputs of governance (D.1) and routing (D.2).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductLine {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceTier {
    Tier1,
    Tier2,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernanceStatus {
    Active,
    Blocked,
    Pending,
    Suspended,
}

/// A catalog row as it arrives from the snapshot. `product_line` is `None`
/// for SKUs that apply to every product line ("universal").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSku {
    pub sku_id: String,
    pub product_name: String,
    #[serde(default)]
    pub ingredient_tags: Option<Vec<String>>,
    #[serde(default)]
    pub category_tags: Option<Vec<String>>,
    #[serde(default)]
    pub risk_tags: Vec<String>,
    #[serde(default)]
    pub product_line: Option<ProductLine>,
    pub evidence_tier: EvidenceTier,
    pub governance_status: GovernanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkuValidationStatus {
    Valid,
    AutoBlocked,
}

/// Reason codes a SKU can be auto-blocked for. A closed registry, same as
/// constraint codes — callers match on the string constants, not free text.
pub mod reason_code {
    pub const INSUFFICIENT_METADATA: &str = "INSUFFICIENT_METADATA";
    pub const MISSING_INGREDIENT_TAGS: &str = "MISSING_INGREDIENT_TAGS";
    pub const EMPTY_INGREDIENT_TAGS: &str = "EMPTY_INGREDIENT_TAGS";
    pub const MISSING_CATEGORY_TAGS: &str = "MISSING_CATEGORY_TAGS";
    pub const EMPTY_CATEGORY_TAGS: &str = "EMPTY_CATEGORY_TAGS";
    pub const BLOCKED_BY_EVIDENCE: &str = "BLOCKED_BY_EVIDENCE";
    pub const HEPATOTOXICITY_RISK: &str = "HEPATOTOXICITY_RISK";
    pub const AUTO_BLOCKED_METADATA: &str = "AUTO_BLOCKED_METADATA";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuValidationResult {
    pub sku_id: String,
    pub product_name: String,
    pub status: SkuValidationStatus,
    pub reason_codes: Vec<String>,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total: usize,
    pub valid_count: usize,
    pub auto_blocked_count: usize,
    pub missing_field_counts: std::collections::BTreeMap<String, usize>,
    pub results_hash: String,
}

/// Output of `CatalogGovernor::validate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovernanceOutput {
    pub valid: Vec<CatalogSku>,
    pub results: Vec<SkuValidationResult>,
    pub coverage: CoverageReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSource {
    Blood,
    Metadata,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedSku {
    pub sku_id: String,
    pub product_name: String,
    pub ingredient_tags: Vec<String>,
    pub category_tags: Vec<String>,
    pub product_line: Option<ProductLine>,
    pub evidence_tier: EvidenceTier,
    pub caution_flags: Vec<String>,
    pub caution_reasons: Vec<String>,
    pub fulfills_requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedSku {
    pub sku_id: String,
    pub product_name: String,
    pub reason_codes: Vec<String>,
    pub blocked_by: BlockSource,
    pub blocked_ingredients: Vec<String>,
    pub blocked_categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingAudit {
    pub total_input_skus: usize,
    pub allowed_count: usize,
    pub blocked_count: usize,
    pub blocked_by_blood: usize,
    pub blocked_by_metadata: usize,
    pub blocked_by_category: usize,
    pub constraints_applied: Vec<String>,
    pub requirements_in_catalog: Vec<String>,
    pub requirements_missing: Vec<String>,
    pub caution_count: usize,
}

/// Output of `Router::route`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingOutput {
    pub allowed: Vec<AllowedSku>,
    pub blocked: Vec<BlockedSku>,
    pub routing_hash: String,
    pub audit: RoutingAudit,
}
