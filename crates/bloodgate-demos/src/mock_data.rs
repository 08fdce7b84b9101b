//! Simulated biomarker panels, catalog snapshots, and user contexts for the
//! bloodgate reference runtime.
//!
//! All data in this module is hardcoded and fictional. No external catalog
//! or lab system is contacted. This module acts as a stand-in for a real
//! panel feed and catalog source in a production deployment.

use bloodgate_contracts::catalog::{CatalogSku, EvidenceTier, GovernanceStatus, ProductLine};
use bloodgate_contracts::intent::{Intent, IntentSource, Sex, UserContext};
use bloodgate_contracts::marker::{BiomarkerEntry, MarkerValue};

fn numeric(code: &str, value: f64, unit: &str) -> BiomarkerEntry {
    BiomarkerEntry {
        code: code.to_string(),
        value: MarkerValue::Numeric(value),
        unit: unit.to_string(),
        observed_at: None,
    }
}

fn categorical(code: &str, value: &str) -> BiomarkerEntry {
    BiomarkerEntry {
        code: code.to_string(),
        value: MarkerValue::Categorical(value.to_string()),
        unit: String::new(),
        observed_at: None,
    }
}

/// Panel for scenario 1: ferritin elevated, CRP unremarkable.
pub fn panel_iron_overload() -> Vec<BiomarkerEntry> {
    vec![numeric("ferritin", 420.0, "ng/mL"), numeric("crp", 0.8, "mg/L")]
}

/// Panel for scenario 2: the same ferritin elevation, but with CRP also
/// elevated — the acute-phase-reactant picture that suppresses the iron
/// block.
pub fn panel_iron_overload_with_inflammation() -> Vec<BiomarkerEntry> {
    vec![numeric("ferritin", 420.0, "ng/mL"), numeric("crp", 8.0, "mg/L")]
}

/// Panel for scenario 3: homozygous MTHFR C677T with elevated homocysteine.
pub fn panel_methylation() -> Vec<BiomarkerEntry> {
    vec![categorical("mthfr_c677t", "TT"), numeric("homocysteine", 14.5, "umol/L")]
}

/// Panel for scenario 4: elevated liver enzymes.
pub fn panel_hepatotoxicity() -> Vec<BiomarkerEntry> {
    vec![numeric("alt", 65.0, "U/L"), numeric("ast", 55.0, "U/L")]
}

pub fn male() -> UserContext {
    UserContext::new(Sex::Male, None)
}

pub fn female() -> UserContext {
    UserContext::new(Sex::Female, None)
}

fn sku(sku_id: &str, product_name: &str, ingredients: &[&str], categories: &[&str]) -> CatalogSku {
    CatalogSku {
        sku_id: sku_id.to_string(),
        product_name: product_name.to_string(),
        ingredient_tags: Some(ingredients.iter().map(|s| s.to_string()).collect()),
        category_tags: Some(categories.iter().map(|s| s.to_string()).collect()),
        risk_tags: Vec::new(),
        product_line: None,
        evidence_tier: EvidenceTier::Tier1,
        governance_status: GovernanceStatus::Active,
    }
}

/// A representative catalog snapshot big enough to exercise every stage's
/// governance and routing decisions across all six scenarios. Not a
/// production catalog — a handful of SKUs chosen to land on one side or the
/// other of each scenario's constraint.
pub fn catalog_snapshot() -> Vec<CatalogSku> {
    vec![
        sku("sku-iron-c", "Iron + Vitamin C", &["iron_bisglycinate", "vitamin_c"], &["minerals"]),
        sku("sku-omega3", "Omega-3 Fish Oil", &["omega3", "epa_dha"], &["fish_oil"]),
        sku("sku-folic-b", "Prenatal B-Complex", &["folic_acid", "vitamin_b12"], &["b_vitamins"]),
        sku("sku-methylfolate", "Active Folate", &["methylfolate", "methylcobalamin"], &["b_vitamins"]),
        sku("sku-liver-combo", "Adaptogen Stress Blend", &["ashwagandha", "rhodiola"], &["adaptogens"]),
        sku("sku-rhodiola", "Rhodiola Rosea", &["rhodiola", "hepatic_sensitive"], &["adaptogens"]),
    ]
}

pub fn intent(code: &str, priority: u32, targets: &[&str], source: IntentSource) -> Intent {
    Intent {
        code: code.to_string(),
        priority,
        ingredient_targets: targets.iter().map(|s| s.to_string()).collect(),
        source,
    }
}

/// Intents for scenario 5: a goal the catalog has no SKU for.
pub fn intents_unmatched() -> Vec<Intent> {
    vec![intent("INTENT_SLEEP", 1, &["obscure_tag"], IntentSource::Goal)]
}

/// Intents for scenario 3: the methylfolate requirement flows through a
/// catalog requirement rather than an intent, so these are left empty and
/// the requirement is passed separately.
pub fn intents_empty() -> Vec<Intent> {
    Vec::new()
}
