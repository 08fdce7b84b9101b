//! Safety gates: tiered rules over normalized markers that emit constraint
//! codes. See `bloodgate-gates` for the registry and predicate logic; this
//! module only holds the value types that cross the stage boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateTier {
    Tier1,
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    Active,
    Suppressed,
}

/// A gate that fired during evaluation, win its resolved status and the
/// constraint codes it actually contributed (the exception's alternate
/// codes if suppressed, its own `emits` otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGate {
    pub gate_id: String,
    pub tier: GateTier,
    pub status: GateStatus,
    pub emitted_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppression_reason: Option<String>,
}

/// Output of `GateEngine::evaluate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateEvaluation {
    pub active_gates: Vec<ActiveGate>,
    pub constraint_codes: Vec<String>,
    pub review_required: bool,
}
