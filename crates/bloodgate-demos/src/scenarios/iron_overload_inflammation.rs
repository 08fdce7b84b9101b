//! Scenario 2: iron overload with acute inflammation.
//!
//! The same ferritin elevation as scenario 1, but CRP is also elevated —
//! the exception path on the iron-overload gate fires, suppressing the
//! block and emitting an acute-inflammation flag instead.

use bloodgate_contracts::error::BloodgateResult;
use bloodgate_contracts::gate::GateStatus;
use bloodgate_contracts::request::PipelineRequest;

use crate::mock_data;

pub fn run_scenario() -> BloodgateResult<()> {
    println!("=== Scenario 2: Iron Overload With Acute Inflammation ===");
    println!();

    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_iron_overload_with_inflammation(),
        user: mock_data::male(),
        intents: Vec::new(),
        requirements: Vec::new(),
        deadline_ms: None,
    };

    println!("Panel: ferritin=420 ng/mL, crp=8.0 mg/L");
    let result = pipeline.run(&request)?;

    let iron_gate = result.active_gates.iter().find(|g| g.gate_id == "iron_overload");
    println!("Gate engine: iron_overload status = {:?}", iron_gate.map(|g| g.status));
    assert_eq!(iron_gate.map(|g| g.status), Some(GateStatus::Suppressed));

    assert!(!result.constraint_codes.contains(&"BLOCK_IRON".to_string()));
    assert!(result.constraint_codes.contains(&"FLAG_ACUTE_INFLAMMATION".to_string()));
    println!("Constraint codes: {:?}", result.constraint_codes);

    let iron_sku_blocked_by_blood = result
        .routing
        .blocked
        .iter()
        .find(|s| s.sku_id == "sku-iron-c")
        .map(|s| s.blocked_by);
    println!("Routing: sku-iron-c blocked_by = {:?} (None means allowed)", iron_sku_blocked_by_blood);

    println!("pipeline_hash = {}", result.pipeline_hash);
    println!();
    Ok(())
}
