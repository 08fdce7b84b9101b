//! # bloodgate-demos
//!
//! Fixtures and narrated end-to-end scenarios for the bloodgate biomarker
//! decision pipeline.
//!
//! Demonstrates six scenarios using mock data:
//!
//! 1. **Iron overload, male** — ferritin alone blocks iron supplementation.
//! 2. **Iron overload with acute inflammation** — elevated CRP suppresses
//!    the iron block and routes an anti-inflammatory flag instead.
//! 3. **MTHFR TT with elevated homocysteine** — methylfolate is required
//!    over synthetic folic acid.
//! 4. **Elevated ALT/AST** — hepatotoxic botanicals are cautioned and a
//!    co-formulated SKU is blocked outright.
//! 5. **Intent without a matching SKU** — an unsatisfiable goal surfaces as
//!    an unmatched intent, not a silent drop.
//! 6. **Determinism cross-run** — the same request run twice produces a
//!    byte-identical `pipeline_hash`.
//!
//! All data is hardcoded and fictional. No external catalog or lab feed is
//! contacted.

pub mod mock_data;
pub mod scenarios;

use std::sync::Arc;

use bloodgate_catalog::{MetadataGovernor, SafetyRouter, StaticCatalogSource};
use bloodgate_core::pipeline::{Pipeline, PipelineContext};
use bloodgate_gates::GateRegistry;
use bloodgate_matcher::IntentMatcher;
use bloodgate_normalizer::RangeTableNormalizer;
use bloodgate_translator::MappingTranslator;

/// Builds a `Pipeline` wired entirely from bundled rulesets and the mock
/// catalog snapshot in `mock_data`. Every scenario runs against this same
/// construction, the way a real deployment would run every request against
/// one process-wide `PipelineContext`.
pub fn bundled_pipeline() -> Pipeline {
    let context = PipelineContext {
        normalizer: Arc::new(RangeTableNormalizer::bundled()),
        gates: Arc::new(GateRegistry::bundled()),
        translator: Arc::new(MappingTranslator::bundled()),
        governor: Arc::new(MetadataGovernor::default()),
        router: Arc::new(SafetyRouter::default()),
        matcher: Arc::new(IntentMatcher::default()),
        catalog_source: Arc::new(StaticCatalogSource::new(mock_data::catalog_snapshot())),
    };
    Pipeline::new(context)
}

#[cfg(test)]
mod tests;
