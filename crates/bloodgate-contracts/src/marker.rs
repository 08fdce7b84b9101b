//! Biomarker panel inputs and the normalized markers Component A produces.

use serde::{Deserialize, Serialize};

/// A raw value as it arrives in a panel entry: numeric for most markers,
/// categorical for genotypes like MTHFR alleles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerValue {
    Numeric(f64),
    Categorical(String),
}

impl MarkerValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            MarkerValue::Numeric(v) => Some(*v),
            MarkerValue::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            MarkerValue::Categorical(s) => Some(s.as_str()),
            MarkerValue::Numeric(_) => None,
        }
    }
}

/// One entry in an inbound biomarker panel. The panel is immutable once
/// received; nothing downstream ever mutates an entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerEntry {
    pub code: String,
    pub value: MarkerValue,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Where a normalized marker's value falls relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeStatus {
    Optimal,
    Normal,
    Low,
    High,
    CriticalLow,
    CriticalHigh,
    Unknown,
}

/// A marker after code resolution, unit conversion, and range classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMarker {
    pub canonical_code: String,
    pub canonical_value: MarkerValue,
    pub canonical_unit: String,
    pub range_status: RangeStatus,
    pub conversion_applied: bool,
    pub computed: bool,
    pub original_code: String,
    pub original_value: MarkerValue,
    pub original_unit: String,
}

/// A panel entry whose `code` was not found in the canonical allow-list.
/// Recorded, never raised — see the "never fails" contract of Component A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownMarker {
    pub code: String,
    pub unit: String,
    pub reason: String,
}

/// Output of `Normalizer::normalize`. `computed` is the subset of
/// `normalized` with `computed = true`, surfaced separately because the
/// outbound response carries them as their own array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizationOutput {
    pub normalized: Vec<NormalizedMarker>,
    pub unknown: Vec<UnknownMarker>,
    pub computed: Vec<NormalizedMarker>,
}
