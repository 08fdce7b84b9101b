//! The canonical marker allow-list, unit conversion tables, and reference
//! ranges Component A classifies against. Loaded once from a versioned TOML
//! document — never hand-coded per call site (§6 "Configuration surface").

use std::collections::BTreeMap;

use bloodgate_contracts::error::{BloodgateError, BloodgateResult};
use bloodgate_contracts::marker::RangeStatus;
use serde::{Deserialize, Serialize};

/// One row of a numeric reference range, scoped to an optional sex and age
/// bracket. The most specific row that matches wins (see `RangeTable::classify`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RangeRow {
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub age_min: Option<u32>,
    #[serde(default)]
    pub age_max: Option<u32>,
    #[serde(default)]
    pub critical_low: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub optimal_low: Option<f64>,
    #[serde(default)]
    pub optimal_high: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub critical_high: Option<f64>,
}

impl RangeRow {
    fn specificity(&self) -> u8 {
        self.sex.is_some() as u8 + (self.age_min.is_some() || self.age_max.is_some()) as u8
    }

    fn matches(&self, sex: &str, age: Option<u32>) -> bool {
        if let Some(row_sex) = &self.sex {
            if !row_sex.eq_ignore_ascii_case(sex) {
                return false;
            }
        }
        if let Some(min) = self.age_min {
            match age {
                Some(a) if a >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.age_max {
            match age {
                Some(a) if a <= max => {}
                _ => return false,
            }
        }
        true
    }

    fn classify(&self, value: f64) -> RangeStatus {
        if let Some(cl) = self.critical_low {
            if value < cl {
                return RangeStatus::CriticalLow;
            }
        }
        if let Some(l) = self.low {
            if value < l {
                return RangeStatus::Low;
            }
        }
        if let Some(ch) = self.critical_high {
            if value > ch {
                return RangeStatus::CriticalHigh;
            }
        }
        if let Some(h) = self.high {
            if value > h {
                return RangeStatus::High;
            }
        }
        if let (Some(ol), Some(oh)) = (self.optimal_low, self.optimal_high) {
            if value >= ol && value <= oh {
                return RangeStatus::Optimal;
            }
        }
        RangeStatus::Normal
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnitConversion {
    pub unit: String,
    pub factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Numeric,
    Categorical,
}

/// A single canonical marker's definition: the aliases that resolve to it,
/// its canonical unit and accepted conversions (numeric markers), its
/// reference range rows, or its allowed categorical values (genotypes).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkerDefinition {
    pub code: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub kind: MarkerKind,
    #[serde(default)]
    pub canonical_unit: Option<String>,
    #[serde(default)]
    pub unit_conversions: Vec<UnitConversion>,
    #[serde(default)]
    pub ranges: Vec<RangeRow>,
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

/// The process-wide, versioned reference-range table: the ~40-marker
/// allow-list, the alias index used to resolve lab-specific codes, the unit
/// conversion tables, and the range rows classification draws from.
#[derive(Debug, Clone)]
pub struct RangeTable {
    ruleset_version: String,
    markers: BTreeMap<String, MarkerDefinition>,
    alias_index: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RangeTableDoc {
    ruleset_version: String,
    #[serde(rename = "marker")]
    markers: Vec<MarkerDefinition>,
}

impl RangeTable {
    pub fn from_toml_str(s: &str) -> BloodgateResult<Self> {
        let doc: RangeTableDoc = toml::from_str(s).map_err(|e| BloodgateError::ConfigError {
            reason: format!("failed to parse reference range TOML: {e}"),
        })?;
        Self::from_doc(doc)
    }

    pub fn from_file(path: &std::path::Path) -> BloodgateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BloodgateError::ConfigError {
            reason: format!("failed to read reference range file '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The bundled reference-range document shipped with the crate.
    pub fn bundled() -> Self {
        Self::from_toml_str(include_str!("../data/reference_ranges.toml"))
            .expect("bundled reference range document must parse")
    }

    fn from_doc(doc: RangeTableDoc) -> BloodgateResult<Self> {
        if doc.ruleset_version.trim().is_empty() {
            return Err(BloodgateError::ConfigError {
                reason: "reference range document has an empty ruleset_version".to_string(),
            });
        }
        let mut markers = BTreeMap::new();
        let mut alias_index = BTreeMap::new();
        for marker in doc.markers {
            let code = marker.code.to_ascii_lowercase();
            alias_index.insert(code.clone(), code.clone());
            for alias in &marker.aliases {
                alias_index.insert(alias.to_ascii_lowercase(), code.clone());
            }
            if markers.insert(code.clone(), marker).is_some() {
                return Err(BloodgateError::ConfigError {
                    reason: format!("duplicate marker code '{code}' in reference range document"),
                });
            }
        }
        Ok(RangeTable {
            ruleset_version: doc.ruleset_version,
            markers,
            alias_index,
        })
    }

    pub fn ruleset_version(&self) -> &str {
        &self.ruleset_version
    }

    /// Resolves a lab-specific code to its canonical marker definition.
    pub fn resolve(&self, code: &str) -> Option<&MarkerDefinition> {
        let canonical = self.alias_index.get(&code.to_ascii_lowercase())?;
        self.markers.get(canonical)
    }

    pub fn marker(&self, canonical_code: &str) -> Option<&MarkerDefinition> {
        self.markers.get(&canonical_code.to_ascii_lowercase())
    }

    pub fn contains_canonical(&self, canonical_code: &str) -> bool {
        self.markers.contains_key(&canonical_code.to_ascii_lowercase())
    }

    /// Converts `value` from `unit` into the marker's canonical unit.
    /// Returns `(canonical_value, conversion_applied)`. An unrecognized unit
    /// for a known numeric marker returns `(value, false)`.
    pub fn convert(&self, marker: &MarkerDefinition, value: f64, unit: &str) -> (f64, bool) {
        let unit_norm = unit.trim().to_ascii_lowercase();
        if let Some(canonical_unit) = &marker.canonical_unit {
            if unit_norm == canonical_unit.to_ascii_lowercase() || unit_norm.is_empty() {
                return (value, true);
            }
            for conversion in &marker.unit_conversions {
                if conversion.unit.to_ascii_lowercase() == unit_norm {
                    return (value * conversion.factor, true);
                }
            }
        }
        (value, false)
    }

    /// Classifies a canonical numeric value against the best-matching range
    /// row for `(sex, age)`. Picks the most specific matching row (sex+age
    /// over sex-only over an unscoped row); ties keep document order.
    pub fn classify(&self, marker: &MarkerDefinition, canonical_value: f64, sex: &str, age: Option<u32>) -> RangeStatus {
        let best = marker
            .ranges
            .iter()
            .filter(|row| row.matches(sex, age))
            .max_by_key(|row| row.specificity());
        match best {
            Some(row) => row.classify(canonical_value),
            None => RangeStatus::Unknown,
        }
    }

    /// Classifies a categorical (genotype) value by exact match against the
    /// marker's allowed values. Unknown allele strings classify `UNKNOWN`.
    pub fn classify_categorical(&self, marker: &MarkerDefinition, value: &str) -> RangeStatus {
        let normalized = value.trim().to_ascii_uppercase();
        if marker
            .allowed_values
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&normalized))
        {
            RangeStatus::Normal
        } else {
            RangeStatus::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_parses_and_resolves_ferritin() {
        let table = RangeTable::bundled();
        assert!(!table.ruleset_version().is_empty());
        let marker = table.resolve("ferritin").expect("ferritin must resolve");
        assert_eq!(marker.code, "ferritin");
    }

    #[test]
    fn unknown_code_does_not_resolve() {
        let table = RangeTable::bundled();
        assert!(table.resolve("not_a_real_marker_code").is_none());
    }

    #[test]
    fn conversion_applies_known_alternate_unit() {
        let table = RangeTable::bundled();
        let marker = table.marker("vitamin_d").unwrap();
        let (converted, applied) = table.convert(marker, 100.0, "nmol/L");
        assert!(applied);
        assert!((converted - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_does_not_convert() {
        let table = RangeTable::bundled();
        let marker = table.marker("vitamin_d").unwrap();
        let (_converted, applied) = table.convert(marker, 100.0, "furlongs");
        assert!(!applied);
    }

    #[test]
    fn ferritin_420_classifies_high_for_male() {
        let table = RangeTable::bundled();
        let marker = table.marker("ferritin").unwrap();
        let status = table.classify(marker, 420.0, "male", Some(35));
        assert!(matches!(status, RangeStatus::High | RangeStatus::CriticalHigh));
    }

    #[test]
    fn categorical_marker_matches_allowed_allele() {
        let table = RangeTable::bundled();
        let marker = table.marker("mthfr_c677t").unwrap();
        assert_eq!(table.classify_categorical(marker, "TT"), RangeStatus::Normal);
        assert_eq!(table.classify_categorical(marker, "ZZ"), RangeStatus::Unknown);
    }
}
