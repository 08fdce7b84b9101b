//! The five stage traits the orchestrator wires together in strict order.
//!
//! Each trait is the trust boundary for one component of §4. Components are
//! `Send + Sync` trait objects so a `Pipeline` can hold one boxed
//! implementation per stage and run many requests concurrently against the
//! same process-wide registries without any stage touching shared mutable
//! state on the request path.

use bloodgate_contracts::catalog::{CatalogSku, GovernanceOutput, RoutingOutput};
use bloodgate_contracts::constraint::TranslatedConstraints;
use bloodgate_contracts::error::BloodgateResult;
use bloodgate_contracts::gate::GateEvaluation;
use bloodgate_contracts::intent::{Intent, Sex, UserContext};
use bloodgate_contracts::marker::{BiomarkerEntry, NormalizationOutput, NormalizedMarker};
use bloodgate_contracts::protocol::MatchingResult;

/// Component A. Never fails: unrecognized panel entries are reported in
/// `unknown`, not raised as errors.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, panel: &[BiomarkerEntry], user: &UserContext) -> NormalizationOutput;

    /// The reference-range/conversion-table version carried into every
    /// response's `versions.reference_ranges` field.
    fn ruleset_version(&self) -> &str;
}

/// Component B. Evaluates the gate registry against normalized markers.
/// A gate whose trigger expression references an unknown canonical code is
/// a construction-time error on the registry, not a request-time one — by
/// the time a `GateEngine` is handed to a `Pipeline` it is already known to
/// be well-formed.
pub trait GateEngine: Send + Sync {
    fn evaluate(&self, normalized: &[NormalizedMarker], sex: Sex) -> GateEvaluation;

    fn ruleset_version(&self) -> &str;
}

/// Component C. Pure: no I/O, no clock reads, no randomness. Calling
/// `translate` twice with the same arguments must return byte-identical
/// values. Still expressed as a trait (rather than a bare function) so the
/// orchestrator can hold it alongside the other stages uniformly and so
/// tests can substitute a registry built from fixtures.
pub trait ConstraintTranslator: Send + Sync {
    fn translate(&self, codes: &[String], sex: Option<Sex>) -> TranslatedConstraints;

    /// Combines another translated-constraints value into `bloodwork`,
    /// only ever adding to its blocked/caution/reason sets (§4.C merge
    /// semantics). Never removes anything `bloodwork` already forbids.
    fn merge(
        &self,
        bloodwork: &TranslatedConstraints,
        other: &TranslatedConstraints,
    ) -> TranslatedConstraints;

    fn mapping_version(&self) -> &str;
}

/// Component D.1. Validates SKU metadata independent of any user's
/// bloodwork-derived constraints.
pub trait CatalogGovernor: Send + Sync {
    fn validate(&self, snapshot: &[CatalogSku]) -> GovernanceOutput;

    fn catalog_version(&self) -> &str;
}

/// Component D.2. Pure safety elimination: only removes SKUs, never adds.
/// `requirements` flows through only to populate `fulfills_requirements` and
/// the `RoutingAudit` coverage fields on the surviving SKUs — it never
/// changes which SKUs are allowed or blocked.
pub trait Router: Send + Sync {
    fn route(
        &self,
        valid_skus: &[CatalogSku],
        constraints: &TranslatedConstraints,
        requirements: &[String],
    ) -> RoutingOutput;

    fn routing_version(&self) -> &str;
}

/// Component E. Assumes routing already applied every safety block; never
/// re-examines or second-guesses a block.
pub trait Matcher: Send + Sync {
    fn match_protocol(
        &self,
        allowed: &[bloodgate_contracts::catalog::AllowedSku],
        intents: &[Intent],
        user: &UserContext,
        requirements: &[String],
    ) -> MatchingResult;

    fn matching_version(&self) -> &str;
}

/// Marker trait implemented by anything that can supply the current
/// catalog snapshot. Kept separate from `CatalogGovernor` because loading
/// the snapshot is the one suspension point inside an otherwise
/// synchronous core (§5) — a real implementation may hit a cache or a
/// background-refreshed in-memory table; `CatalogGovernor` itself is pure
/// once handed a snapshot.
pub trait CatalogSource: Send + Sync {
    fn ensure_loaded(&self) -> BloodgateResult<std::sync::Arc<Vec<CatalogSku>>>;
}
