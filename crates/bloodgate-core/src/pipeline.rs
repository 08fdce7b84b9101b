//! The orchestrator: wires the five stage traits into the strict
//! A→B→C→D→E sequence and enforces the invariants that must hold no matter
//! which concrete stage implementations are plugged in.

use std::sync::Arc;
use std::time::Instant;

use bloodgate_contracts::catalog::GovernanceStatus;
use bloodgate_contracts::context::PipelineVersions;
use bloodgate_contracts::error::{BloodgateError, BloodgateResult};
use bloodgate_contracts::request::{PipelineRequest, PipelineResult};

use crate::traits::{CatalogGovernor, CatalogSource, ConstraintTranslator, GateEngine, Matcher, Normalizer, Router};

/// The process-wide, atomically-swappable bundle of stage implementations
/// and the catalog source. Held behind `Arc` so a reload can swap out any
/// one piece (e.g. the catalog source, after a new snapshot is published)
/// without disturbing requests already in flight — they keep the `Arc`
/// clone they took at the start of their run.
pub struct PipelineContext {
    pub normalizer: Arc<dyn Normalizer>,
    pub gates: Arc<dyn GateEngine>,
    pub translator: Arc<dyn ConstraintTranslator>,
    pub governor: Arc<dyn CatalogGovernor>,
    pub router: Arc<dyn Router>,
    pub matcher: Arc<dyn Matcher>,
    pub catalog_source: Arc<dyn CatalogSource>,
}

pub struct Pipeline {
    context: PipelineContext,
}

impl Pipeline {
    pub fn new(context: PipelineContext) -> Self {
        Pipeline { context }
    }

    /// Runs the full decision pipeline for one request. Stages run strictly
    /// in order on the calling thread/task; there is no shared mutable
    /// state touched along the way beyond the `Arc`-held registries.
    pub fn run(&self, request: &PipelineRequest) -> BloodgateResult<PipelineResult> {
        let start = Instant::now();
        let deadline_ms = request.deadline_ms;

        self.check_deadline(start, deadline_ms, "catalog_load")?;
        let catalog = self.context.catalog_source.ensure_loaded()?;

        self.check_deadline(start, deadline_ms, "normalize")?;
        let normalization = self.context.normalizer.normalize(&request.panel, &request.user);
        tracing::info!(
            normalized = normalization.normalized.len(),
            unknown = normalization.unknown.len(),
            "normalizer stage complete"
        );

        self.check_deadline(start, deadline_ms, "gate_evaluate")?;
        let gate_eval = self
            .context
            .gates
            .evaluate(&normalization.normalized, request.user.sex);
        tracing::info!(
            active_gates = gate_eval.active_gates.len(),
            constraint_codes = gate_eval.constraint_codes.len(),
            review_required = gate_eval.review_required,
            "gate engine stage complete"
        );

        self.check_deadline(start, deadline_ms, "translate")?;
        let translated = self
            .context
            .translator
            .translate(&gate_eval.constraint_codes, Some(request.user.sex));
        if !translated.upholds_dominance() {
            return Err(BloodgateError::InternalInvariant {
                reason: "blocked_ingredients and recommended_ingredients overlap after translate"
                    .to_string(),
            });
        }
        tracing::info!(
            blocked_ingredients = translated.blocked_ingredients.len(),
            recommended_ingredients = translated.recommended_ingredients.len(),
            "constraint translator stage complete"
        );

        self.check_deadline(start, deadline_ms, "catalog_governance")?;
        let active_rows: Vec<_> = catalog
            .iter()
            .filter(|sku| sku.governance_status == GovernanceStatus::Active)
            .cloned()
            .collect();
        let governance = self.context.governor.validate(&active_rows);

        self.check_deadline(start, deadline_ms, "routing")?;
        let routing = self
            .context
            .router
            .route(&governance.valid, &translated, &request.requirements);
        if routing
            .allowed
            .iter()
            .any(|sku| sku.ingredient_tags.iter().any(|t| translated.blocked_ingredients.contains(t)))
        {
            return Err(BloodgateError::InternalInvariant {
                reason: "a blocked ingredient appears on an allowed SKU after routing".to_string(),
            });
        }

        self.check_deadline(start, deadline_ms, "matching")?;
        let matching = self.context.matcher.match_protocol(
            &routing.allowed,
            &request.intents,
            &request.user,
            &request.requirements,
        );

        let pipeline_hash = bloodgate_audit::stable_hash(&(
            &translated.output_hash,
            &routing.routing_hash,
            &matching.match_hash,
        ));

        let versions = PipelineVersions {
            reference_ranges: self.context.normalizer.ruleset_version().to_string(),
            gate_registry: self.context.gates.ruleset_version().to_string(),
            mapping: self.context.translator.mapping_version().to_string(),
            catalog: self.context.governor.catalog_version().to_string(),
            routing: self.context.router.routing_version().to_string(),
            matching: self.context.matcher.matching_version().to_string(),
        };

        Ok(PipelineResult {
            normalized_markers: normalization.normalized,
            unknown_markers: normalization.unknown,
            computed_markers: normalization.computed,
            active_gates: gate_eval.active_gates,
            constraint_codes: gate_eval.constraint_codes,
            translated_constraints: translated,
            routing,
            protocol: matching.protocol,
            unmatched_intents: matching.unmatched_intents,
            requirements_unfulfilled: matching.audit.requirements_unfulfilled.clone(),
            pipeline_hash,
            versions,
        })
    }

    fn check_deadline(&self, start: Instant, deadline_ms: Option<u64>, stage: &str) -> BloodgateResult<()> {
        if let Some(limit_ms) = deadline_ms {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            if elapsed_ms > limit_ms {
                tracing::warn!(stage, elapsed_ms, limit_ms, "deadline exceeded before stage entry");
                return Err(BloodgateError::DeadlineExceeded { elapsed_ms, limit_ms });
            }
        }
        Ok(())
    }
}
