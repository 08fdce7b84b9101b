//! Output of Component C, the pure constraint translator.

use serde::{Deserialize, Serialize};

/// The enforcement fields derived from a set of constraint codes. Every
/// collection is sorted lexicographically before this value is constructed
/// so byte-identical inputs always produce byte-identical serialization.
///
/// Invariant: `blocked_ingredients ∩ recommended_ingredients = ∅`. This is
/// enforced by the translator, not by this type, but callers may assert it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatedConstraints {
    pub blocked_ingredients: Vec<String>,
    pub blocked_categories: Vec<String>,
    pub blocked_targets: Vec<String>,
    pub caution_flags: Vec<String>,
    pub recommended_ingredients: Vec<String>,
    pub reason_codes: Vec<String>,
    pub unknown_codes: Vec<String>,
    pub input_hash: String,
    pub output_hash: String,
    pub mapping_version: String,
}

impl TranslatedConstraints {
    /// `true` iff the dominance invariant holds. Checked by the orchestrator
    /// after every translate/merge call; a violation is `INTERNAL_INVARIANT`.
    pub fn upholds_dominance(&self) -> bool {
        self.blocked_ingredients
            .iter()
            .all(|i| !self.recommended_ingredients.contains(i))
    }
}
