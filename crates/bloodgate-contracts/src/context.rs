//! The version identifiers threaded end-to-end into every response so a
//! caller can tell which ruleset bundle produced a given protocol.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineVersions {
    pub reference_ranges: String,
    pub gate_registry: String,
    pub mapping: String,
    pub catalog: String,
    pub routing: String,
    pub matching: String,
}
