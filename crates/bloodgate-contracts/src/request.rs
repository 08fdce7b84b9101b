//! The synchronous request/response boundary the core is invoked through.

use serde::{Deserialize, Serialize};

use crate::catalog::RoutingOutput;
use crate::constraint::TranslatedConstraints;
use crate::context::PipelineVersions;
use crate::gate::ActiveGate;
use crate::intent::{Intent, UserContext};
use crate::marker::{BiomarkerEntry, NormalizedMarker, UnknownMarker};
use crate::protocol::{ProtocolItem, UnmatchedIntent};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub panel: Vec<BiomarkerEntry>,
    pub user: UserContext,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

/// The full outbound response shape: every stage's output plus the
/// top-level `pipeline_hash` combining all stage hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub normalized_markers: Vec<NormalizedMarker>,
    pub unknown_markers: Vec<UnknownMarker>,
    pub computed_markers: Vec<NormalizedMarker>,
    pub active_gates: Vec<ActiveGate>,
    pub constraint_codes: Vec<String>,
    pub translated_constraints: TranslatedConstraints,
    pub routing: RoutingOutput,
    pub protocol: Vec<ProtocolItem>,
    pub unmatched_intents: Vec<UnmatchedIntent>,
    pub requirements_unfulfilled: Vec<String>,
    pub pipeline_hash: String,
    pub versions: PipelineVersions,
}
