//! Final protocol output of Component E.

use serde::{Deserialize, Serialize};

/// Sentinel priority rank for SKUs that entered the protocol as a pure
/// requirement fulfillment, matching no intent. Large enough that any real
/// intent priority sorts ahead of it.
pub const UNRANKED_PRIORITY: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolReason {
    IntentMatch,
    Requirement,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolItem {
    pub sku_id: String,
    pub product_name: String,
    pub matched_intents: Vec<String>,
    pub matched_ingredients: Vec<String>,
    pub match_score: f64,
    pub reason: ProtocolReason,
    pub warnings: Vec<String>,
    pub priority_rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedIntent {
    pub code: String,
    pub priority: u32,
    pub ingredient_targets: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingAudit {
    pub total_allowed_skus: usize,
    pub gender_filtered_count: usize,
    pub intents_processed: usize,
    pub intents_matched: usize,
    pub intents_unmatched: usize,
    pub requirements_total: usize,
    pub requirements_fulfilled: Vec<String>,
    pub requirements_unfulfilled: Vec<String>,
    pub protocol_items_count: usize,
    pub caution_warnings_count: usize,
}

/// Output of `Matcher::match_protocol`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingResult {
    pub protocol: Vec<ProtocolItem>,
    pub unmatched_intents: Vec<UnmatchedIntent>,
    pub match_hash: String,
    pub audit: MatchingAudit,
}
