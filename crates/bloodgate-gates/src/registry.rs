//! `GateRegistry`: binds the bundled gate metadata document to the
//! predicate functions in `predicates.rs` and implements `GateEngine`.
//!
//! Construction validates that every declared `gate_id` has both metadata
//! and a registered predicate, and that every `emits`/`exception_emits`
//! code exists in the constraint mapping — the "ruleset misconfiguration is
//! a startup failure" requirement of §7. A `GateRegistry` that exists is
//! known-good; `evaluate` never fails.

use std::collections::{BTreeMap, BTreeSet};

use bloodgate_contracts::error::{BloodgateError, BloodgateResult};
use bloodgate_contracts::gate::{ActiveGate, GateEvaluation, GateStatus, GateTier};
use bloodgate_contracts::intent::Sex;
use bloodgate_contracts::marker::NormalizedMarker;
use bloodgate_core::traits::GateEngine;
use bloodgate_ref::constraint_mapping::ConstraintMappingTable;
use bloodgate_ref::gate_metadata::GateMetadataTable;
use bloodgate_ref::reference_range::RangeTable;

use crate::lookup::MarkerLookup;
use crate::predicates::{self, ExceptionFn, TriggerFn};

struct GatePredicate {
    trigger: TriggerFn,
    exception: Option<ExceptionFn>,
}

/// The closed set of (gate_id → predicate) bindings this build of
/// `bloodgate-gates` knows how to evaluate. Adding a gate means adding a
/// row here *and* a matching row in `gate_registry.toml`; construction
/// fails loudly if the two fall out of sync.
fn predicate_bindings() -> BTreeMap<&'static str, GatePredicate> {
    let mut m = BTreeMap::new();
    m.insert(
        "iron_overload",
        GatePredicate {
            trigger: predicates::iron_overload_trigger,
            exception: Some(predicates::iron_overload_exception as ExceptionFn),
        },
    );
    m.insert(
        "hepatotoxicity",
        GatePredicate {
            trigger: predicates::hepatotoxicity_trigger,
            exception: None,
        },
    );
    m.insert(
        "hyperkalemia",
        GatePredicate {
            trigger: predicates::hyperkalemia_trigger,
            exception: None,
        },
    );
    m.insert(
        "renal_impairment",
        GatePredicate {
            trigger: predicates::renal_impairment_trigger,
            exception: Some(predicates::renal_impairment_exception as ExceptionFn),
        },
    );
    m.insert(
        "post_mi",
        GatePredicate {
            trigger: predicates::post_mi_trigger,
            exception: None,
        },
    );
    m.insert(
        "thyroid_dysfunction",
        GatePredicate {
            trigger: predicates::thyroid_dysfunction_trigger,
            exception: None,
        },
    );
    m.insert(
        "insulin_resistance",
        GatePredicate {
            trigger: predicates::insulin_resistance_trigger,
            exception: None,
        },
    );
    m.insert(
        "methylation",
        GatePredicate {
            trigger: predicates::methylation_trigger,
            exception: None,
        },
    );
    m.insert(
        "inflammatory",
        GatePredicate {
            trigger: predicates::inflammatory_trigger,
            exception: None,
        },
    );
    m
}

pub struct GateRegistry {
    metadata: GateMetadataTable,
    predicates: BTreeMap<&'static str, GatePredicate>,
}

impl GateRegistry {
    /// Builds a registry from a metadata table, validating it against
    /// `mapping`, against `ranges` (every `required_markers` entry must be a
    /// known canonical code — §4.B "a gate whose expression references an
    /// unknown canonical code is a configuration error"), and against this
    /// crate's predicate bindings. Returns `RulesetMisconfigured` on any
    /// mismatch — never a runtime panic once the caller has a `GateRegistry`
    /// in hand.
    pub fn from_metadata(metadata: GateMetadataTable, mapping: &ConstraintMappingTable, ranges: &RangeTable) -> BloodgateResult<Self> {
        metadata.validate_against_mapping(mapping)?;

        for gate in metadata.iter() {
            for code in &gate.required_markers {
                if !ranges.contains_canonical(code) {
                    return Err(BloodgateError::RulesetMisconfigured {
                        reason: format!(
                            "gate '{}' requires unknown canonical marker code '{code}'",
                            gate.gate_id
                        ),
                    });
                }
            }
        }

        let predicates = predicate_bindings();
        let metadata_ids: BTreeSet<&str> = metadata.iter().map(|g| g.gate_id.as_str()).collect();
        let predicate_ids: BTreeSet<&str> = predicates.keys().copied().collect();

        for gate_id in metadata_ids.difference(&predicate_ids) {
            return Err(BloodgateError::RulesetMisconfigured {
                reason: format!("gate '{gate_id}' has metadata but no registered predicate"),
            });
        }
        for gate_id in predicate_ids.difference(&metadata_ids) {
            return Err(BloodgateError::RulesetMisconfigured {
                reason: format!("predicate '{gate_id}' is registered but has no metadata row"),
            });
        }

        Ok(GateRegistry { metadata, predicates })
    }

    /// Builds a registry from the bundled gate metadata and constraint
    /// mapping documents. Panics on misconfiguration, matching the other
    /// `bundled()` constructors in this workspace — the bundled documents
    /// are fixtures checked in with the source, not external input.
    pub fn bundled() -> Self {
        let mapping = ConstraintMappingTable::bundled();
        let ranges = RangeTable::bundled();
        Self::from_metadata(GateMetadataTable::bundled(), &mapping, &ranges)
            .expect("bundled gate registry must validate against bundled constraint mapping and reference ranges")
    }
}

impl GateEngine for GateRegistry {
    fn evaluate(&self, normalized: &[NormalizedMarker], sex: Sex) -> GateEvaluation {
        let lookup = MarkerLookup::new(normalized);
        let mut active_gates = Vec::new();
        let mut constraint_codes: BTreeSet<String> = BTreeSet::new();
        let mut review_required = false;

        for gate in self.metadata.iter() {
            let predicate = self
                .predicates
                .get(gate.gate_id.as_str())
                .expect("registry invariant: every metadata gate_id has a bound predicate");

            if !gate.required_markers.iter().all(|m| lookup.present(m)) {
                if gate.tier == GateTier::Tier1 {
                    review_required = true;
                    tracing::debug!(gate_id = %gate.gate_id, "tier 1 gate missing required markers, review required");
                }
                continue;
            }

            let Some(codes) = (predicate.trigger)(&lookup, sex) else {
                continue;
            };
            if codes.is_empty() {
                continue;
            }

            let exception_fired = predicate.exception.and_then(|exception| exception(&lookup, sex));

            if let Some(alt_codes) = exception_fired {
                let emitted: Vec<String> = sorted_owned(&alt_codes);
                constraint_codes.extend(emitted.iter().cloned());
                tracing::debug!(gate_id = %gate.gate_id, codes = ?emitted, "gate suppressed, exception emitted");
                active_gates.push(ActiveGate {
                    gate_id: gate.gate_id.clone(),
                    tier: gate.tier,
                    status: GateStatus::Suppressed,
                    emitted_codes: emitted,
                    suppression_reason: Some(format!("{}_exception", gate.gate_id)),
                });
            } else {
                let emitted: Vec<String> = sorted_owned(&codes);
                constraint_codes.extend(emitted.iter().cloned());
                tracing::debug!(gate_id = %gate.gate_id, codes = ?emitted, "gate active");
                active_gates.push(ActiveGate {
                    gate_id: gate.gate_id.clone(),
                    tier: gate.tier,
                    status: GateStatus::Active,
                    emitted_codes: emitted,
                    suppression_reason: None,
                });
            }
        }

        active_gates.sort_by(|a, b| a.gate_id.cmp(&b.gate_id));
        GateEvaluation {
            active_gates,
            constraint_codes: constraint_codes.into_iter().collect(),
            review_required,
        }
    }

    fn ruleset_version(&self) -> &str {
        self.metadata.ruleset_version()
    }
}

fn sorted_owned(codes: &[&'static str]) -> Vec<String> {
    let mut v: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    v.sort();
    v.dedup();
    v
}
