//! Reference runtime demo scenarios.
//!
//! Each scenario is a self-contained module that wires up the bundled
//! pipeline with a mock biomarker panel and narrates the stage-by-stage
//! decision.

pub mod determinism;
pub mod hepatotoxicity;
pub mod iron_overload;
pub mod iron_overload_inflammation;
pub mod methylation;
pub mod unmatched_intent;
