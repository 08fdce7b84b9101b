//! Trigger and exception predicates for every gate named in the bundled
//! gate registry (`bloodgate-ref`'s `gate_registry.toml`). One function pair
//! per `gate_id`, registered against it in `registry.rs` at construction
//! time — the predicates are code because they need typed numeric and
//! categorical comparisons; the surrounding metadata (tier, `emits`,
//! description) is data (§4.B).
//!
//! A trigger returns `Some(codes)` with the constraint codes that apply
//! when it fires, `None` when it doesn't. Gates whose emitted code depends
//! on the direction or magnitude of a marker (thyroid, inflammation) pick
//! among their `emits` set inside the trigger itself rather than needing a
//! second predicate per direction.

use bloodgate_contracts::intent::Sex;

use crate::lookup::MarkerLookup;

pub type TriggerFn = fn(&MarkerLookup, Sex) -> Option<Vec<&'static str>>;
pub type ExceptionFn = fn(&MarkerLookup, Sex) -> Option<Vec<&'static str>>;

pub fn iron_overload_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    lookup.status_is_high("ferritin").then(|| vec!["BLOCK_IRON"])
}

/// Elevated ferritin with elevated CRP reads as acute-phase-reactant
/// elevation, not iron overload — the canonical exception threaded through
/// scenario 2 of §8.
pub fn iron_overload_exception(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    lookup.status_is_high("crp").then(|| vec!["FLAG_ACUTE_INFLAMMATION"])
}

pub fn hepatotoxicity_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    (lookup.status_is_high("alt") || lookup.status_is_high("ast")).then(|| vec!["CAUTION_HEPATOTOXIC"])
}

pub fn hyperkalemia_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    lookup.status_is_high("potassium").then(|| vec!["BLOCK_POTASSIUM"])
}

pub fn renal_impairment_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    (lookup.status_is_low("egfr") || lookup.status_is_high("creatinine")).then(|| vec!["CAUTION_RENAL"])
}

/// A critically low eGFR escalates the caution to a hard block — modeled
/// as the same suppress-and-emit-alternate mechanism the iron gate uses,
/// even though semantically this is an escalation rather than a dismissal.
pub fn renal_impairment_exception(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    lookup.status_is_critical_low("egfr").then(|| vec!["BLOCK_RENAL"])
}

/// No normalized marker or demographic field captures "recent
/// myocardial infarction" in this core's data model — that's intake
/// history, not bloodwork, and the core does not infer unsupplied facts
/// (§1 non-goals). The gate is registered (so the mapping/metadata
/// validation that `BLOCK_POST_MI` exists still runs) but never fires from
/// this pipeline alone; a future intake field would plug in here without
/// touching the registry shape.
pub fn post_mi_trigger(_lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    None
}

pub fn thyroid_dysfunction_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    if lookup.status_is_high("tsh") {
        Some(vec!["FLAG_HYPOTHYROID"])
    } else if lookup.status_is_low("tsh") {
        Some(vec!["FLAG_HYPERTHYROID"])
    } else {
        None
    }
}

pub fn insulin_resistance_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    lookup.status_is_high("homa_ir").then(|| vec!["FLAG_INSULIN_RESISTANCE"])
}

pub fn methylation_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    (lookup.categorical_is("mthfr_c677t", "TT") && lookup.status_is_high("homocysteine"))
        .then(|| vec!["FLAG_METHYLFOLATE_REQUIRED"])
}

/// Distinguishes acute from chronic by magnitude: a critical CRP spike
/// reads as an acute flare, a sustained high reading as chronic
/// inflammation. Independent of the iron-overload exception path, which
/// has its own threshold (§4.B supplement).
pub fn inflammatory_trigger(lookup: &MarkerLookup, _sex: Sex) -> Option<Vec<&'static str>> {
    if lookup.status_is_critical_high("crp") {
        Some(vec!["FLAG_ACUTE_INFLAMMATION"])
    } else if lookup.status_is_high("crp") {
        Some(vec!["FLAG_CHRONIC_INFLAMMATION"])
    } else {
        None
    }
}
