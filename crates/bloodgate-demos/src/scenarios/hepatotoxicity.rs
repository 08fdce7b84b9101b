//! Scenario 4: elevated ALT/AST.
//!
//! A hepatotoxicity caution blocks ashwagandha outright — a co-formulated
//! SKU carrying it is blocked, while a SKU carrying only rhodiola is
//! allowed and, once matched, still carries the hepatic-sensitive caution
//! forward as a warning.

use bloodgate_contracts::error::BloodgateResult;
use bloodgate_contracts::intent::IntentSource;
use bloodgate_contracts::request::PipelineRequest;

use crate::mock_data;

pub fn run_scenario() -> BloodgateResult<()> {
    println!("=== Scenario 4: Elevated ALT/AST ===");
    println!();

    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_hepatotoxicity(),
        user: mock_data::male(),
        intents: vec![mock_data::intent("INTENT_STRESS", 1, &["rhodiola"], IntentSource::Goal)],
        requirements: Vec::new(),
        deadline_ms: None,
    };

    println!("Panel: alt=65 U/L, ast=55 U/L");
    let result = pipeline.run(&request)?;

    assert!(result.constraint_codes.contains(&"CAUTION_HEPATOTOXIC".to_string()));
    assert!(result.translated_constraints.blocked_ingredients.contains(&"ashwagandha".to_string()));
    println!("Constraint codes: {:?}", result.constraint_codes);

    let combo_blocked = result.routing.blocked.iter().any(|s| s.sku_id == "sku-liver-combo");
    println!("Routing: sku-liver-combo blocked = {combo_blocked}");
    assert!(combo_blocked);

    let rhodiola_item = result.protocol.iter().find(|p| p.sku_id == "sku-rhodiola");
    println!("Protocol: sku-rhodiola warnings = {:?}", rhodiola_item.map(|p| &p.warnings));
    assert!(rhodiola_item.is_some_and(|p| !p.warnings.is_empty()));

    println!("pipeline_hash = {}", result.pipeline_hash);
    println!();
    Ok(())
}
