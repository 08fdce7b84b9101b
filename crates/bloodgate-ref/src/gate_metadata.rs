//! Gate *metadata* — `gate_id`, `tier`, `emits`, and a human-readable
//! description — loaded from a versioned document the same way the
//! reference-range table and constraint mapping are (§4.B "Gate registry
//! representation"). The boolean trigger/exception predicates are code, not
//! data; they live in `bloodgate-gates` and are registered against the
//! `gate_id`s declared here at registry-construction time.

use std::collections::BTreeMap;

use bloodgate_contracts::error::{BloodgateError, BloodgateResult};
use bloodgate_contracts::gate::GateTier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateMetadata {
    pub gate_id: String,
    pub tier: GateTier,
    pub description: String,
    pub emits: Vec<String>,
    #[serde(default)]
    pub exception_emits: Vec<String>,
    #[serde(default)]
    pub required_markers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GateMetadataDoc {
    ruleset_version: String,
    #[serde(rename = "gate")]
    gates: Vec<GateMetadata>,
}

/// The closed set of gate metadata rows, keyed by `gate_id`.
#[derive(Debug, Clone)]
pub struct GateMetadataTable {
    ruleset_version: String,
    gates: BTreeMap<String, GateMetadata>,
}

impl GateMetadataTable {
    pub fn from_toml_str(s: &str) -> BloodgateResult<Self> {
        let doc: GateMetadataDoc = toml::from_str(s).map_err(|e| BloodgateError::ConfigError {
            reason: format!("failed to parse gate registry TOML: {e}"),
        })?;
        Self::from_doc(doc)
    }

    pub fn from_file(path: &std::path::Path) -> BloodgateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BloodgateError::ConfigError {
            reason: format!("failed to read gate registry file '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The bundled gate registry document shipped with the crate.
    pub fn bundled() -> Self {
        Self::from_toml_str(include_str!("../data/gate_registry.toml"))
            .expect("bundled gate registry document must parse")
    }

    fn from_doc(doc: GateMetadataDoc) -> BloodgateResult<Self> {
        if doc.ruleset_version.trim().is_empty() {
            return Err(BloodgateError::ConfigError {
                reason: "gate registry document has an empty ruleset_version".to_string(),
            });
        }
        let mut gates = BTreeMap::new();
        for gate in doc.gates {
            if gates.insert(gate.gate_id.clone(), gate.clone()).is_some() {
                return Err(BloodgateError::ConfigError {
                    reason: format!("duplicate gate_id '{}' in gate registry document", gate.gate_id),
                });
            }
        }
        Ok(GateMetadataTable {
            ruleset_version: doc.ruleset_version,
            gates,
        })
    }

    pub fn ruleset_version(&self) -> &str {
        &self.ruleset_version
    }

    pub fn get(&self, gate_id: &str) -> Option<&GateMetadata> {
        self.gates.get(gate_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GateMetadata> {
        self.gates.values()
    }

    /// Validates every declared `emits`/`exception_emits` code exists in
    /// `mapping` — the "ruleset misconfiguration is a startup failure"
    /// requirement of §7.
    pub fn validate_against_mapping(&self, mapping: &crate::constraint_mapping::ConstraintMappingTable) -> BloodgateResult<()> {
        for gate in self.gates.values() {
            for code in gate.emits.iter().chain(gate.exception_emits.iter()) {
                if !mapping.contains(code) {
                    return Err(BloodgateError::RulesetMisconfigured {
                        reason: format!(
                            "gate '{}' emits unknown constraint code '{code}'",
                            gate.gate_id
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint_mapping::ConstraintMappingTable;

    #[test]
    fn bundled_registry_validates_against_bundled_mapping() {
        let gates = GateMetadataTable::bundled();
        let mapping = ConstraintMappingTable::bundled();
        gates.validate_against_mapping(&mapping).expect("bundled gates and mapping must agree");
    }

    #[test]
    fn iron_overload_gate_is_tier_one() {
        let gates = GateMetadataTable::bundled();
        let gate = gates.get("iron_overload").expect("iron_overload gate must exist");
        assert_eq!(gate.tier, GateTier::Tier1);
        assert!(gate.emits.iter().any(|c| c == "BLOCK_IRON"));
        assert!(gate.exception_emits.iter().any(|c| c == "FLAG_ACUTE_INFLAMMATION"));
    }
}
