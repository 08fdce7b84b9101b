//! Scenario 6: determinism cross-run.
//!
//! Running scenario 1's request twice back-to-back must yield byte-identical
//! `pipeline_hash` and stage hashes — the pipeline reads the clock only for
//! deadline checks, never folds a timestamp or random value into a hash.

use bloodgate_contracts::error::BloodgateResult;
use bloodgate_contracts::request::PipelineRequest;

use crate::mock_data;

pub fn run_scenario() -> BloodgateResult<()> {
    println!("=== Scenario 6: Determinism Cross-Run ===");
    println!();

    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_iron_overload(),
        user: mock_data::male(),
        intents: Vec::new(),
        requirements: Vec::new(),
        deadline_ms: None,
    };

    let first = pipeline.run(&request)?;
    let second = pipeline.run(&request)?;

    println!("Run 1 pipeline_hash = {}", first.pipeline_hash);
    println!("Run 2 pipeline_hash = {}", second.pipeline_hash);
    assert_eq!(first.pipeline_hash, second.pipeline_hash);
    assert_eq!(first.translated_constraints.output_hash, second.translated_constraints.output_hash);
    assert_eq!(first.routing.routing_hash, second.routing.routing_hash);

    println!("Identical across runs: yes");
    println!();
    Ok(())
}
