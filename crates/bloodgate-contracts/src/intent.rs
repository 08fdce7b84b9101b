//! User context and prioritized intents — inputs to Component E.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    Goal,
    Painpoint,
    Blood,
}

/// `priority` is ascending rank: 1 is the highest priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub code: String,
    pub priority: u32,
    pub ingredient_targets: Vec<String>,
    pub source: IntentSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub sex: Sex,
    pub product_line: ProductLine,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub cycle_phase: Option<String>,
}

impl UserContext {
    /// Constructs a context, defaulting `product_line` from `sex` when the
    /// caller didn't supply one explicitly (male → MALE, female → FEMALE).
    pub fn new(sex: Sex, product_line: Option<ProductLine>) -> Self {
        let product_line = product_line.unwrap_or(match sex {
            Sex::Male => ProductLine::Male,
            Sex::Female => ProductLine::Female,
        });
        UserContext {
            sex,
            product_line,
            age: None,
            cycle_phase: None,
        }
    }
}
