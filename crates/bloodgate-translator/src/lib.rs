//! Component C: the pure constraint translator (§4.C).
//!
//! `MappingTranslator` holds a `ConstraintMappingTable` loaded once at
//! startup and does no I/O, no clock reads, and no randomness at request
//! time. Calling `translate` twice with the same `codes`/`sex` must return
//! byte-identical values — every test below leans on that.

use std::collections::BTreeSet;

use bloodgate_contracts::constraint::TranslatedConstraints;
use bloodgate_contracts::intent::Sex;
use bloodgate_core::traits::ConstraintTranslator;
use bloodgate_ref::constraint_mapping::ConstraintMappingTable;

pub struct MappingTranslator {
    mapping: ConstraintMappingTable,
}

impl MappingTranslator {
    pub fn new(mapping: ConstraintMappingTable) -> Self {
        MappingTranslator { mapping }
    }

    /// Builds a translator over the bundled constraint mapping document.
    pub fn bundled() -> Self {
        MappingTranslator::new(ConstraintMappingTable::bundled())
    }

    fn sex_str(sex: Option<Sex>) -> &'static str {
        match sex {
            Some(Sex::Male) => "male",
            Some(Sex::Female) => "female",
            None => "unspecified",
        }
    }

    /// Computes `output_hash` over exactly the fields step 6 of §4.C names:
    /// the five target sets and `reason_codes` — not `unknown_codes`, not
    /// `mapping_version`.
    fn output_hash(
        blocked_ingredients: &[String],
        blocked_categories: &[String],
        blocked_targets: &[String],
        caution_flags: &[String],
        recommended_ingredients: &[String],
        reason_codes: &[String],
    ) -> String {
        bloodgate_audit::stable_hash(&(
            blocked_ingredients,
            blocked_categories,
            blocked_targets,
            caution_flags,
            recommended_ingredients,
            reason_codes,
        ))
    }
}

fn sorted_vec(set: BTreeSet<String>) -> Vec<String> {
    set.into_iter().collect()
}

impl ConstraintTranslator for MappingTranslator {
    fn translate(&self, codes: &[String], sex: Option<Sex>) -> TranslatedConstraints {
        let mut sorted_codes: Vec<String> = codes
            .iter()
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        sorted_codes.sort();
        sorted_codes.dedup();

        let mut blocked_ingredients = BTreeSet::new();
        let mut blocked_categories = BTreeSet::new();
        let mut blocked_targets = BTreeSet::new();
        let mut caution_flags = BTreeSet::new();
        let mut recommended_ingredients = BTreeSet::new();
        let mut reason_codes = BTreeSet::new();
        let mut unknown_codes = Vec::new();

        for code in &sorted_codes {
            match self.mapping.get(code) {
                Some(row) => {
                    blocked_ingredients.extend(row.blocked_ingredients.iter().cloned());
                    blocked_categories.extend(row.blocked_categories.iter().cloned());
                    blocked_targets.extend(row.blocked_targets.iter().cloned());
                    caution_flags.extend(row.caution_flags.iter().cloned());
                    recommended_ingredients.extend(row.recommended_ingredients.iter().cloned());
                    reason_codes.extend(row.reason_codes.iter().cloned());
                }
                None => {
                    tracing::debug!(code = %code, "unknown constraint code");
                    unknown_codes.push(code.clone());
                    reason_codes.insert(format!("UNKNOWN_CONSTRAINT_{code}"));
                }
            }
        }

        // "Blood does not negotiate": a block always wins over a recommendation.
        recommended_ingredients.retain(|ingredient| !blocked_ingredients.contains(ingredient));

        let blocked_ingredients = sorted_vec(blocked_ingredients);
        let blocked_categories = sorted_vec(blocked_categories);
        let blocked_targets = sorted_vec(blocked_targets);
        let caution_flags = sorted_vec(caution_flags);
        let recommended_ingredients = sorted_vec(recommended_ingredients);
        let reason_codes = sorted_vec(reason_codes);
        unknown_codes.sort();
        unknown_codes.dedup();

        let input_hash = bloodgate_audit::stable_hash(&(&sorted_codes, Self::sex_str(sex)));
        let output_hash = Self::output_hash(
            &blocked_ingredients,
            &blocked_categories,
            &blocked_targets,
            &caution_flags,
            &recommended_ingredients,
            &reason_codes,
        );

        tracing::info!(
            codes_in = sorted_codes.len(),
            unknown = unknown_codes.len(),
            blocked_ingredients = blocked_ingredients.len(),
            "constraint translator complete"
        );

        TranslatedConstraints {
            blocked_ingredients,
            blocked_categories,
            blocked_targets,
            caution_flags,
            recommended_ingredients,
            reason_codes,
            unknown_codes,
            input_hash,
            output_hash,
            mapping_version: self.mapping.mapping_version().to_string(),
        }
    }

    /// Only ever adds to `bloodwork`'s blocked/caution/reason sets (§4.C
    /// "Merge semantics"). `input_hash` is carried forward from `bloodwork`
    /// unchanged — a merge has no single fresh code list to hash, so the
    /// merged value keeps its bloodwork anchor; `output_hash` is recomputed
    /// over the merged fields so it still satisfies the step-6 definition.
    fn merge(&self, bloodwork: &TranslatedConstraints, other: &TranslatedConstraints) -> TranslatedConstraints {
        let mut blocked_ingredients: BTreeSet<String> = bloodwork.blocked_ingredients.iter().cloned().collect();
        blocked_ingredients.extend(other.blocked_ingredients.iter().cloned());

        let mut blocked_categories: BTreeSet<String> = bloodwork.blocked_categories.iter().cloned().collect();
        blocked_categories.extend(other.blocked_categories.iter().cloned());

        let mut blocked_targets: BTreeSet<String> = bloodwork.blocked_targets.iter().cloned().collect();
        blocked_targets.extend(other.blocked_targets.iter().cloned());

        let mut caution_flags: BTreeSet<String> = bloodwork.caution_flags.iter().cloned().collect();
        caution_flags.extend(other.caution_flags.iter().cloned());

        let mut reason_codes: BTreeSet<String> = bloodwork.reason_codes.iter().cloned().collect();
        reason_codes.extend(other.reason_codes.iter().cloned());

        let mut recommended_ingredients: BTreeSet<String> = bloodwork.recommended_ingredients.iter().cloned().collect();
        recommended_ingredients.extend(other.recommended_ingredients.iter().cloned());
        recommended_ingredients.retain(|ingredient| !blocked_ingredients.contains(ingredient));

        let mut unknown_codes: BTreeSet<String> = bloodwork.unknown_codes.iter().cloned().collect();
        unknown_codes.extend(other.unknown_codes.iter().cloned());

        let blocked_ingredients = sorted_vec(blocked_ingredients);
        let blocked_categories = sorted_vec(blocked_categories);
        let blocked_targets = sorted_vec(blocked_targets);
        let caution_flags = sorted_vec(caution_flags);
        let recommended_ingredients = sorted_vec(recommended_ingredients);
        let reason_codes = sorted_vec(reason_codes);

        let output_hash = Self::output_hash(
            &blocked_ingredients,
            &blocked_categories,
            &blocked_targets,
            &caution_flags,
            &recommended_ingredients,
            &reason_codes,
        );

        TranslatedConstraints {
            blocked_ingredients,
            blocked_categories,
            blocked_targets,
            caution_flags,
            recommended_ingredients,
            reason_codes,
            unknown_codes: sorted_vec(unknown_codes),
            input_hash: bloodwork.input_hash.clone(),
            output_hash,
            mapping_version: bloodwork.mapping_version.clone(),
        }
    }

    fn mapping_version(&self) -> &str {
        self.mapping.mapping_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn block_iron_populates_blocked_ingredients() {
        let translator = MappingTranslator::bundled();
        let out = translator.translate(&codes(&["BLOCK_IRON"]), Some(Sex::Male));
        assert!(out.blocked_ingredients.contains(&"iron_bisglycinate".to_string()));
        assert!(out.blocked_ingredients.contains(&"ferrous_sulfate".to_string()));
        assert!(out.unknown_codes.is_empty());
    }

    #[test]
    fn unknown_code_is_recorded_with_synthetic_reason() {
        let translator = MappingTranslator::bundled();
        let out = translator.translate(&codes(&["NOT_A_REAL_CODE"]), None);
        assert_eq!(out.unknown_codes, vec!["NOT_A_REAL_CODE".to_string()]);
        assert!(out.reason_codes.contains(&"UNKNOWN_CONSTRAINT_NOT_A_REAL_CODE".to_string()));
    }

    #[test]
    fn dominance_invariant_holds_after_translate() {
        let translator = MappingTranslator::bundled();
        let out = translator.translate(&codes(&["FLAG_METHYLFOLATE_REQUIRED"]), Some(Sex::Male));
        assert!(out.blocked_ingredients.contains(&"folic_acid".to_string()));
        assert!(!out.recommended_ingredients.contains(&"folic_acid".to_string()));
        assert!(out.upholds_dominance());
    }

    #[test]
    fn same_inputs_produce_byte_identical_output() {
        let translator = MappingTranslator::bundled();
        let a = translator.translate(&codes(&["BLOCK_IRON", "CAUTION_HEPATOTOXIC"]), Some(Sex::Male));
        let b = translator.translate(&codes(&["caution_hepatotoxic", "block_iron"]), Some(Sex::Male));
        assert_eq!(a.output_hash, b.output_hash);
        assert_eq!(a.input_hash, b.input_hash);
        assert_eq!(a.blocked_ingredients, b.blocked_ingredients);
    }

    #[test]
    fn rerunning_translate_on_its_own_codes_is_idempotent() {
        let translator = MappingTranslator::bundled();
        let first = translator.translate(&codes(&["BLOCK_IRON", "FLAG_METHYLFOLATE_REQUIRED"]), Some(Sex::Male));
        let second = translator.translate(&codes(&["BLOCK_IRON", "FLAG_METHYLFOLATE_REQUIRED"]), Some(Sex::Male));
        assert_eq!(first.output_hash, second.output_hash);
    }

    #[test]
    fn empty_codes_yield_empty_constraints_and_nonempty_mapping_version() {
        let translator = MappingTranslator::bundled();
        let out = translator.translate(&[], None);
        assert!(out.blocked_ingredients.is_empty());
        assert!(!out.mapping_version.is_empty());
    }

    #[test]
    fn merge_only_adds_to_bloodwork_sets() {
        let translator = MappingTranslator::bundled();
        let bloodwork = translator.translate(&codes(&["BLOCK_IRON"]), Some(Sex::Male));
        let other = translator.translate(&codes(&["FLAG_OXIDATIVE_STRESS"]), Some(Sex::Male));

        let merged = translator.merge(&bloodwork, &other);

        for ingredient in &bloodwork.blocked_ingredients {
            assert!(merged.blocked_ingredients.contains(ingredient));
        }
        for reason in &bloodwork.reason_codes {
            assert!(merged.reason_codes.contains(reason));
        }
        assert!(merged.recommended_ingredients.iter().any(|i| i == "nac" || i == "vitamin_c"));
        assert!(merged.upholds_dominance());
    }

    #[test]
    fn merge_strips_other_recommendations_blocked_by_bloodwork() {
        let translator = MappingTranslator::bundled();
        // BLOCK_IRON blocks iron_bisglycinate; FLAG_ANEMIA recommends it.
        let bloodwork = translator.translate(&codes(&["BLOCK_IRON"]), Some(Sex::Male));
        let other = translator.translate(&codes(&["FLAG_ANEMIA"]), Some(Sex::Male));

        let merged = translator.merge(&bloodwork, &other);
        assert!(!merged.recommended_ingredients.contains(&"iron_bisglycinate".to_string()));
        assert!(merged.upholds_dominance());
    }
}
