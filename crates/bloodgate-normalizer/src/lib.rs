//! Component A: resolves raw `(code, value, unit)` panel entries against the
//! bundled reference-range table, producing normalized markers with their
//! range status, plus derived markers computed from the normalized set
//! (§4.A).

use bloodgate_contracts::intent::{Sex, UserContext};
use bloodgate_contracts::marker::{
    BiomarkerEntry, MarkerValue, NormalizationOutput, NormalizedMarker, RangeStatus, UnknownMarker,
};
use bloodgate_core::traits::Normalizer;
use bloodgate_ref::reference_range::MarkerKind;
use bloodgate_ref::RangeTable;

mod derived;

/// Normalizes against a `RangeTable` loaded once at construction. Stateless
/// beyond that table — safe to share across concurrent requests.
pub struct RangeTableNormalizer {
    table: RangeTable,
}

impl RangeTableNormalizer {
    pub fn new(table: RangeTable) -> Self {
        RangeTableNormalizer { table }
    }

    /// Builds a normalizer over the bundled reference-range document.
    pub fn bundled() -> Self {
        RangeTableNormalizer::new(RangeTable::bundled())
    }

    fn sex_str(sex: Sex) -> &'static str {
        match sex {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    fn normalize_entry(&self, entry: &BiomarkerEntry, sex: &str, age: Option<u32>) -> Result<NormalizedMarker, UnknownMarker> {
        let marker = self.table.resolve(&entry.code).ok_or_else(|| UnknownMarker {
            code: entry.code.clone(),
            unit: entry.unit.clone(),
            reason: "unrecognized biomarker code".to_string(),
        })?;

        match marker.kind {
            MarkerKind::Categorical => {
                let raw = entry.value.as_categorical().ok_or_else(|| UnknownMarker {
                    code: entry.code.clone(),
                    unit: entry.unit.clone(),
                    reason: "expected a categorical value for this code".to_string(),
                })?;
                let range_status = self.table.classify_categorical(marker, raw);
                Ok(NormalizedMarker {
                    canonical_code: marker.code.clone(),
                    canonical_value: MarkerValue::Categorical(raw.trim().to_ascii_uppercase()),
                    canonical_unit: entry.unit.clone(),
                    range_status,
                    conversion_applied: true,
                    computed: false,
                    original_code: entry.code.clone(),
                    original_value: entry.value.clone(),
                    original_unit: entry.unit.clone(),
                })
            }
            MarkerKind::Numeric => {
                let raw_value = parse_numeric(&entry.value).ok_or_else(|| UnknownMarker {
                    code: entry.code.clone(),
                    unit: entry.unit.clone(),
                    reason: "could not parse a numeric value for this code".to_string(),
                })?;
                if raw_value < 0.0 {
                    return Err(UnknownMarker {
                        code: entry.code.clone(),
                        unit: entry.unit.clone(),
                        reason: "negative values are not valid for this marker".to_string(),
                    });
                }
                let (canonical_value, conversion_applied) = self.table.convert(marker, raw_value, &entry.unit);
                let range_status = if conversion_applied {
                    self.table.classify(marker, canonical_value, sex, age)
                } else {
                    RangeStatus::Unknown
                };
                Ok(NormalizedMarker {
                    canonical_code: marker.code.clone(),
                    canonical_value: MarkerValue::Numeric(canonical_value),
                    canonical_unit: marker
                        .canonical_unit
                        .clone()
                        .unwrap_or_else(|| entry.unit.clone()),
                    range_status,
                    conversion_applied,
                    computed: false,
                    original_code: entry.code.clone(),
                    original_value: entry.value.clone(),
                    original_unit: entry.unit.clone(),
                })
            }
        }
    }
}

impl Normalizer for RangeTableNormalizer {
    fn normalize(&self, panel: &[BiomarkerEntry], user: &UserContext) -> NormalizationOutput {
        let sex = Self::sex_str(user.sex);
        let mut normalized = Vec::new();
        let mut unknown = Vec::new();

        for entry in panel {
            match self.normalize_entry(entry, sex, user.age) {
                Ok(marker) => normalized.push(marker),
                Err(u) => unknown.push(u),
            }
        }

        let computed = derived::compute(&self.table, &normalized, sex, user.age);
        normalized.extend(computed.iter().cloned());

        normalized.sort_by(|a, b| a.canonical_code.cmp(&b.canonical_code));
        unknown.sort_by(|a, b| a.code.cmp(&b.code));

        NormalizationOutput {
            normalized,
            unknown,
            computed,
        }
    }

    fn ruleset_version(&self) -> &str {
        self.table.ruleset_version()
    }
}

/// Parses a panel entry's raw value into a numeric reading, applying the
/// `<X`/`>X` and thousand-separator edge cases (§4.A "Edge cases"). A
/// bound is accepted with reduced confidence: `<X` becomes `X/2`, `>X`
/// becomes `1.1·X`.
fn parse_numeric(value: &MarkerValue) -> Option<f64> {
    match value {
        MarkerValue::Numeric(v) => Some(*v),
        MarkerValue::Categorical(s) => {
            let trimmed = s.trim().replace(',', "");
            if let Some(rest) = trimmed.strip_prefix('<') {
                rest.trim().parse::<f64>().ok().map(|x| x / 2.0)
            } else if let Some(rest) = trimmed.strip_prefix('>') {
                rest.trim().parse::<f64>().ok().map(|x| x * 1.1)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgate_contracts::catalog::ProductLine;

    fn entry(code: &str, value: f64, unit: &str) -> BiomarkerEntry {
        BiomarkerEntry {
            code: code.to_string(),
            value: MarkerValue::Numeric(value),
            unit: unit.to_string(),
            observed_at: None,
        }
    }

    fn categorical_entry(code: &str, value: &str) -> BiomarkerEntry {
        BiomarkerEntry {
            code: code.to_string(),
            value: MarkerValue::Categorical(value.to_string()),
            unit: String::new(),
            observed_at: None,
        }
    }

    #[test]
    fn resolves_alias_and_classifies_high_ferritin_for_male() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, Some(ProductLine::Male));
        let panel = vec![entry("ferr", 420.0, "ng/mL")];
        let out = normalizer.normalize(&panel, &user);
        assert_eq!(out.normalized.len(), 1);
        let marker = &out.normalized[0];
        assert_eq!(marker.canonical_code, "ferritin");
        assert!(matches!(marker.range_status, RangeStatus::High | RangeStatus::CriticalHigh));
        assert!(out.unknown.is_empty());
    }

    #[test]
    fn unrecognized_code_is_reported_not_raised() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![entry("not_a_real_marker", 1.0, "units")];
        let out = normalizer.normalize(&panel, &user);
        assert!(out.normalized.is_empty());
        assert_eq!(out.unknown.len(), 1);
        assert_eq!(out.unknown[0].code, "not_a_real_marker");
    }

    #[test]
    fn less_than_bound_is_halved() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![categorical_entry("crp", "<0.2")];
        let out = normalizer.normalize(&panel, &user);
        let marker = &out.normalized[0];
        assert_eq!(marker.canonical_value.as_numeric(), Some(0.1));
    }

    #[test]
    fn negative_value_is_rejected_as_unknown() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![entry("glucose", -5.0, "mg/dL")];
        let out = normalizer.normalize(&panel, &user);
        assert!(out.normalized.is_empty());
        assert_eq!(out.unknown.len(), 1);
    }

    #[test]
    fn comma_separated_thousand_value_parses() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![categorical_entry("tpo_antibodies", "1,200")];
        let out = normalizer.normalize(&panel, &user);
        assert_eq!(out.normalized[0].canonical_value.as_numeric(), Some(1200.0));
    }

    #[test]
    fn unit_conversion_applies_for_vitamin_d() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![entry("vitamin_d", 100.0, "nmol/L")];
        let out = normalizer.normalize(&panel, &user);
        let marker = &out.normalized[0];
        assert!(marker.conversion_applied);
        assert!((marker.canonical_value.as_numeric().unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_flags_range_status_unknown() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![entry("vitamin_d", 40.0, "furlongs")];
        let out = normalizer.normalize(&panel, &user);
        let marker = &out.normalized[0];
        assert!(!marker.conversion_applied);
        assert_eq!(marker.range_status, RangeStatus::Unknown);
    }

    #[test]
    fn categorical_mthfr_value_is_upcased_and_classified() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![categorical_entry("mthfr_c677t", "tt")];
        let out = normalizer.normalize(&panel, &user);
        let marker = &out.normalized[0];
        assert_eq!(marker.canonical_value.as_categorical(), Some("TT"));
        assert_eq!(marker.range_status, RangeStatus::Normal);
    }

    #[test]
    fn homa_ir_is_computed_when_glucose_and_insulin_present() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![entry("glucose", 90.0, "mg/dL"), entry("insulin", 9.0, "uIU/mL")];
        let out = normalizer.normalize(&panel, &user);
        assert_eq!(out.computed.len(), 1);
        assert_eq!(out.computed[0].canonical_code, "homa_ir");
        assert!(out.computed[0].computed);
        let expected = 90.0 * 9.0 / 405.0;
        assert!((out.computed[0].canonical_value.as_numeric().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn normalized_output_is_sorted_by_canonical_code() {
        let normalizer = RangeTableNormalizer::bundled();
        let user = UserContext::new(Sex::Male, None);
        let panel = vec![entry("tsh", 2.0, "uIU/mL"), entry("alt", 20.0, "U/L")];
        let out = normalizer.normalize(&panel, &user);
        let codes: Vec<_> = out.normalized.iter().map(|m| m.canonical_code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }
}
