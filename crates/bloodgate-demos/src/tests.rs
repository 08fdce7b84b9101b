//! Drives a full `PipelineRequest` → `PipelineResult` run for each scenario
//! plus the determinism cross-run check (§8 end-to-end scenarios).

use bloodgate_contracts::gate::GateStatus;
use bloodgate_contracts::protocol::ProtocolReason;
use bloodgate_contracts::request::PipelineRequest;

use crate::mock_data;

#[test]
fn scenario_1_iron_overload_blocks_iron_skus() {
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_iron_overload(),
        user: mock_data::male(),
        intents: Vec::new(),
        requirements: Vec::new(),
        deadline_ms: None,
    };
    let result = pipeline.run(&request).unwrap();
    assert!(result.constraint_codes.contains(&"BLOCK_IRON".to_string()));
    let blocked = result.routing.blocked.iter().find(|s| s.sku_id == "sku-iron-c").unwrap();
    assert!(blocked.reason_codes.iter().any(|r| r == "BLOCK_INGREDIENT_IRON_BISGLYCINATE"));
}

#[test]
fn scenario_2_acute_inflammation_suppresses_iron_block() {
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_iron_overload_with_inflammation(),
        user: mock_data::male(),
        intents: Vec::new(),
        requirements: Vec::new(),
        deadline_ms: None,
    };
    let result = pipeline.run(&request).unwrap();
    assert!(!result.constraint_codes.contains(&"BLOCK_IRON".to_string()));
    assert!(result.constraint_codes.contains(&"FLAG_ACUTE_INFLAMMATION".to_string()));
    let iron_gate = result.active_gates.iter().find(|g| g.gate_id == "iron_overload").unwrap();
    assert_eq!(iron_gate.status, GateStatus::Suppressed);
    assert!(result.routing.blocked.iter().all(|s| s.sku_id != "sku-iron-c"));
}

#[test]
fn scenario_3_methylation_blocks_folic_acid_allows_methylfolate() {
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_methylation(),
        user: mock_data::female(),
        intents: Vec::new(),
        requirements: vec!["methylfolate".to_string()],
        deadline_ms: None,
    };
    let result = pipeline.run(&request).unwrap();
    assert!(result.constraint_codes.contains(&"FLAG_METHYLFOLATE_REQUIRED".to_string()));
    assert!(result.routing.blocked.iter().any(|s| s.sku_id == "sku-folic-b"));
    let item = result.protocol.iter().find(|p| p.sku_id == "sku-methylfolate").unwrap();
    assert_eq!(item.reason, ProtocolReason::Requirement);
}

#[test]
fn scenario_4_hepatotoxicity_blocks_combo_allows_rhodiola_with_warning() {
    use bloodgate_contracts::intent::IntentSource;
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_hepatotoxicity(),
        user: mock_data::male(),
        intents: vec![mock_data::intent("INTENT_STRESS", 1, &["rhodiola"], IntentSource::Goal)],
        requirements: Vec::new(),
        deadline_ms: None,
    };
    let result = pipeline.run(&request).unwrap();
    assert!(result.constraint_codes.contains(&"CAUTION_HEPATOTOXIC".to_string()));
    assert!(result.routing.blocked.iter().any(|s| s.sku_id == "sku-liver-combo"));
    let item = result.protocol.iter().find(|p| p.sku_id == "sku-rhodiola").unwrap();
    assert!(!item.warnings.is_empty());
}

#[test]
fn scenario_5_unmatched_intent_is_reported_with_reason() {
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: Vec::new(),
        user: mock_data::male(),
        intents: mock_data::intents_unmatched(),
        requirements: Vec::new(),
        deadline_ms: None,
    };
    let result = pipeline.run(&request).unwrap();
    assert!(result.protocol.is_empty());
    assert_eq!(result.unmatched_intents.len(), 1);
    assert_eq!(result.unmatched_intents[0].code, "INTENT_SLEEP");
    assert!(!result.unmatched_intents[0].reason.is_empty());
}

#[test]
fn scenario_6_determinism_cross_run_matches_byte_for_byte() {
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: mock_data::panel_iron_overload(),
        user: mock_data::male(),
        intents: Vec::new(),
        requirements: Vec::new(),
        deadline_ms: None,
    };
    let first = pipeline.run(&request).unwrap();
    let second = pipeline.run(&request).unwrap();
    assert_eq!(first.pipeline_hash, second.pipeline_hash);
    assert_eq!(first.translated_constraints.output_hash, second.translated_constraints.output_hash);
    assert_eq!(first.routing.routing_hash, second.routing.routing_hash);
}

#[test]
fn empty_request_yields_empty_protocol_and_nonempty_versions() {
    let pipeline = crate::bundled_pipeline();
    let request = PipelineRequest {
        panel: Vec::new(),
        user: mock_data::male(),
        intents: Vec::new(),
        requirements: Vec::new(),
        deadline_ms: None,
    };
    let result = pipeline.run(&request).unwrap();
    assert!(result.protocol.is_empty());
    assert!(result.unmatched_intents.is_empty());
    assert!(!result.versions.reference_ranges.is_empty());
    assert!(!result.versions.matching.is_empty());
}
