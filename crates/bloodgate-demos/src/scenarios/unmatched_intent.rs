//! Scenario 5: an intent with no matching SKU.
//!
//! The catalog carries no SKU tagged with the requested ingredient target,
//! so the intent surfaces in `unmatched_intents` with a reason rather than
//! silently disappearing.

use bloodgate_contracts::error::BloodgateResult;
use bloodgate_contracts::request::PipelineRequest;

use crate::mock_data;

pub fn run_scenario() -> BloodgateResult<()> {
    println!("=== Scenario 5: Intent Without A Matching SKU ===");
    println!();

    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: Vec::new(),
        user: mock_data::male(),
        intents: mock_data::intents_unmatched(),
        requirements: Vec::new(),
        deadline_ms: None,
    };

    println!("Intents: INTENT_SLEEP targeting 'obscure_tag', priority 1");
    let result = pipeline.run(&request)?;

    assert!(result.protocol.is_empty());
    assert_eq!(result.unmatched_intents.len(), 1);
    let unmatched = &result.unmatched_intents[0];
    println!("Unmatched intent: code = {}, reason = {}", unmatched.code, unmatched.reason);
    assert_eq!(unmatched.code, "INTENT_SLEEP");
    assert!(!unmatched.reason.is_empty());

    println!("pipeline_hash = {}", result.pipeline_hash);
    println!();
    Ok(())
}
