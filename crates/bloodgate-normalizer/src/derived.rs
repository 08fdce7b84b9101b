//! Derived markers computed from already-normalized inputs (§4.A step 4):
//! HOMA-IR, sodium:potassium ratio, and LDL:HDL ratio. Each enters the same
//! normalized set as its inputs, flagged `computed = true`.

use bloodgate_contracts::marker::{MarkerValue, NormalizedMarker};
use bloodgate_ref::RangeTable;

fn find(normalized: &[NormalizedMarker], code: &str) -> Option<f64> {
    normalized
        .iter()
        .find(|m| m.canonical_code == code)
        .and_then(|m| m.canonical_value.as_numeric())
}

fn build(table: &RangeTable, code: &str, value: f64, unit: &str, sex: &str, age: Option<u32>) -> Option<NormalizedMarker> {
    let marker = table.marker(code)?;
    let range_status = table.classify(marker, value, sex, age);
    Some(NormalizedMarker {
        canonical_code: code.to_string(),
        canonical_value: MarkerValue::Numeric(value),
        canonical_unit: unit.to_string(),
        range_status,
        conversion_applied: true,
        computed: true,
        original_code: code.to_string(),
        original_value: MarkerValue::Numeric(value),
        original_unit: unit.to_string(),
    })
}

/// Computes every derived marker whose inputs are present in `normalized`.
/// Markers already UNKNOWN-ranged (failed unit conversion) are still usable
/// as inputs here — only presence is required, not a clean range status.
pub fn compute(table: &RangeTable, normalized: &[NormalizedMarker], sex: &str, age: Option<u32>) -> Vec<NormalizedMarker> {
    let mut out = Vec::new();

    if let (Some(glucose), Some(insulin)) = (find(normalized, "glucose"), find(normalized, "insulin")) {
        let homa_ir = glucose * insulin / 405.0;
        if let Some(marker) = build(table, "homa_ir", homa_ir, "index", sex, age) {
            out.push(marker);
        }
    }

    if let (Some(sodium), Some(potassium)) = (find(normalized, "sodium"), find(normalized, "potassium")) {
        if potassium != 0.0 {
            let ratio = sodium / potassium;
            if let Some(marker) = build(table, "sodium_potassium_ratio", ratio, "ratio", sex, age) {
                out.push(marker);
            }
        }
    }

    if let (Some(ldl), Some(hdl)) = (find(normalized, "ldl"), find(normalized, "hdl")) {
        if hdl != 0.0 {
            let ratio = ldl / hdl;
            if let Some(marker) = build(table, "ldl_hdl_ratio", ratio, "ratio", sex, age) {
                out.push(marker);
            }
        }
    }

    out
}
