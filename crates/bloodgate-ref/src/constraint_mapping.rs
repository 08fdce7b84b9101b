//! The constraint-code → enforcement-fields registry Component C translates
//! against. A versioned document keyed by constraint code, loaded once at
//! startup (§4.C, §6 "Constraint mapping").

use std::collections::BTreeMap;

use bloodgate_contracts::error::{BloodgateError, BloodgateResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConstraintMappingRow {
    pub code: String,
    #[serde(default)]
    pub blocked_ingredients: Vec<String>,
    #[serde(default)]
    pub blocked_categories: Vec<String>,
    #[serde(default)]
    pub blocked_targets: Vec<String>,
    #[serde(default)]
    pub caution_flags: Vec<String>,
    #[serde(default)]
    pub recommended_ingredients: Vec<String>,
    #[serde(default)]
    pub reason_codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConstraintMappingDoc {
    mapping_version: String,
    #[serde(rename = "constraint")]
    constraints: Vec<ConstraintMappingRow>,
}

/// The closed registry of constraint codes, each with exactly one
/// semantic meaning (§3 "Constraint code").
#[derive(Debug, Clone)]
pub struct ConstraintMappingTable {
    mapping_version: String,
    rows: BTreeMap<String, ConstraintMappingRow>,
}

impl ConstraintMappingTable {
    pub fn from_toml_str(s: &str) -> BloodgateResult<Self> {
        let doc: ConstraintMappingDoc = toml::from_str(s).map_err(|e| BloodgateError::ConfigError {
            reason: format!("failed to parse constraint mapping TOML: {e}"),
        })?;
        Self::from_doc(doc)
    }

    pub fn from_file(path: &std::path::Path) -> BloodgateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BloodgateError::ConfigError {
            reason: format!("failed to read constraint mapping file '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The bundled constraint mapping document shipped with the crate,
    /// grounded in the source engine's mapping module (`mapping_version = "1.0.0"`).
    pub fn bundled() -> Self {
        Self::from_toml_str(include_str!("../data/constraint_mapping.toml"))
            .expect("bundled constraint mapping document must parse")
    }

    fn from_doc(doc: ConstraintMappingDoc) -> BloodgateResult<Self> {
        if doc.mapping_version.trim().is_empty() {
            return Err(BloodgateError::ConfigError {
                reason: "constraint mapping document has an empty mapping_version".to_string(),
            });
        }
        let mut rows = BTreeMap::new();
        for row in doc.constraints {
            let code = row.code.to_ascii_uppercase();
            if rows.insert(code.clone(), row).is_some() {
                return Err(BloodgateError::ConfigError {
                    reason: format!("duplicate constraint code '{code}' in mapping document"),
                });
            }
        }
        Ok(ConstraintMappingTable {
            mapping_version: doc.mapping_version,
            rows,
        })
    }

    pub fn mapping_version(&self) -> &str {
        &self.mapping_version
    }

    pub fn get(&self, code: &str) -> Option<&ConstraintMappingRow> {
        self.rows.get(&code.to_ascii_uppercase())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rows.contains_key(&code.to_ascii_uppercase())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_has_block_iron() {
        let table = ConstraintMappingTable::bundled();
        let row = table.get("BLOCK_IRON").expect("BLOCK_IRON must exist");
        assert!(row.blocked_ingredients.iter().any(|i| i == "iron_bisglycinate"));
        assert!(row.blocked_ingredients.iter().any(|i| i == "ferrous_sulfate"));
    }

    #[test]
    fn unknown_code_is_absent() {
        let table = ConstraintMappingTable::bundled();
        assert!(!table.contains("NOT_A_REAL_CODE"));
    }

    #[test]
    fn hepatotoxic_caution_blocks_ashwagandha_even_at_caution_tier() {
        let table = ConstraintMappingTable::bundled();
        let row = table.get("CAUTION_HEPATOTOXIC").unwrap();
        assert!(row.blocked_ingredients.iter().any(|i| i == "ashwagandha"));
    }
}
