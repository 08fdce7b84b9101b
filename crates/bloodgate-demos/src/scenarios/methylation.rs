//! Scenario 3: MTHFR TT with elevated homocysteine.
//!
//! Homozygous MTHFR C677T together with elevated homocysteine requires
//! methylfolate over synthetic folic acid: a SKU carrying folic_acid is
//! blocked, while a SKU carrying methylfolate is allowed and enters the
//! protocol as a requirement fulfillment.

use bloodgate_contracts::error::BloodgateResult;
use bloodgate_contracts::protocol::ProtocolReason;
use bloodgate_contracts::request::PipelineRequest;

use crate::mock_data;

pub fn run_scenario() -> BloodgateResult<()> {
    println!("=== Scenario 3: MTHFR TT, Elevated Homocysteine ===");
    println!();

    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_methylation(),
        user: mock_data::female(),
        intents: mock_data::intents_empty(),
        requirements: vec!["methylfolate".to_string()],
        deadline_ms: None,
    };

    println!("Panel: mthfr_c677t=TT, homocysteine=14.5 umol/L");
    let result = pipeline.run(&request)?;

    assert!(result.constraint_codes.contains(&"FLAG_METHYLFOLATE_REQUIRED".to_string()));
    println!("Constraint codes: {:?}", result.constraint_codes);

    let folic_blocked = result.routing.blocked.iter().any(|s| s.sku_id == "sku-folic-b");
    println!("Routing: sku-folic-b blocked = {folic_blocked}");
    assert!(folic_blocked);

    let methylfolate_item = result.protocol.iter().find(|p| p.sku_id == "sku-methylfolate");
    println!("Protocol: sku-methylfolate present = {}, reason = {:?}", methylfolate_item.is_some(), methylfolate_item.map(|p| p.reason));
    assert!(methylfolate_item.is_some());
    assert_eq!(methylfolate_item.unwrap().reason, ProtocolReason::Requirement);

    println!("pipeline_hash = {}", result.pipeline_hash);
    println!();
    Ok(())
}
