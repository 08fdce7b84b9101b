//! Component E: assembles the final protocol from allowed SKUs, a user's
//! prioritized intents, and biomarker-derived requirements (§4.E). Never
//! re-examines a routing-stage block — every SKU handed in is already safe.

use std::collections::BTreeSet;

use bloodgate_contracts::catalog::AllowedSku;
use bloodgate_contracts::intent::{Intent, UserContext};
use bloodgate_contracts::protocol::{MatchingAudit, MatchingResult, ProtocolItem, ProtocolReason, UnmatchedIntent, UNRANKED_PRIORITY};
use bloodgate_core::traits::Matcher;

const NO_MATCHING_SKU_REASON: &str = "No SKU with matching ingredient tags available";

pub struct IntentMatcher {
    matching_version: String,
}

impl IntentMatcher {
    pub fn new(matching_version: impl Into<String>) -> Self {
        IntentMatcher {
            matching_version: matching_version.into(),
        }
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        IntentMatcher::new("1.0.0")
    }
}

struct Candidate<'a> {
    sku: &'a AllowedSku,
    tags: BTreeSet<String>,
    matched_intent_codes: BTreeSet<String>,
    matched_intent_priorities: Vec<u32>,
    overlap_tags: BTreeSet<String>,
    union_targets: BTreeSet<String>,
    fulfilled_reqs: BTreeSet<String>,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

impl Matcher for IntentMatcher {
    fn match_protocol(&self, allowed: &[AllowedSku], intents: &[Intent], user: &UserContext, requirements: &[String]) -> MatchingResult {
        // Gender filter: a SKU with no product_line is universal.
        let mut candidates: Vec<Candidate> = allowed
            .iter()
            .filter(|sku| sku.product_line.is_none() || sku.product_line == Some(user.product_line))
            .map(|sku| Candidate {
                sku,
                tags: sku.ingredient_tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
                matched_intent_codes: BTreeSet::new(),
                matched_intent_priorities: Vec::new(),
                overlap_tags: BTreeSet::new(),
                union_targets: BTreeSet::new(),
                fulfilled_reqs: BTreeSet::new(),
            })
            .collect();
        let gender_filtered_count = allowed.len() - candidates.len();

        let mut sorted_intents: Vec<&Intent> = intents.iter().collect();
        sorted_intents.sort_by_key(|i| i.priority);

        let mut unmatched_intents = Vec::new();
        for intent in &sorted_intents {
            let targets: BTreeSet<String> = intent.ingredient_targets.iter().map(|t| t.to_ascii_lowercase()).collect();
            let mut matched_any = false;
            for candidate in candidates.iter_mut() {
                let overlap: BTreeSet<String> = candidate.tags.intersection(&targets).cloned().collect();
                if !overlap.is_empty() {
                    matched_any = true;
                    candidate.matched_intent_codes.insert(intent.code.clone());
                    candidate.matched_intent_priorities.push(intent.priority);
                    candidate.overlap_tags.extend(overlap);
                    candidate.union_targets.extend(targets.iter().cloned());
                }
            }
            if !matched_any {
                unmatched_intents.push(UnmatchedIntent {
                    code: intent.code.clone(),
                    priority: intent.priority,
                    ingredient_targets: intent.ingredient_targets.clone(),
                    reason: NO_MATCHING_SKU_REASON.to_string(),
                });
            }
        }

        let mut dedup_requirements: Vec<String> = Vec::new();
        let mut seen_requirements = BTreeSet::new();
        for req in requirements {
            let req = req.to_ascii_lowercase();
            if seen_requirements.insert(req.clone()) {
                dedup_requirements.push(req);
            }
        }

        let mut requirements_fulfilled = BTreeSet::new();
        for req in &dedup_requirements {
            for candidate in candidates.iter_mut() {
                if candidate.tags.contains(req) {
                    candidate.fulfilled_reqs.insert(req.clone());
                    requirements_fulfilled.insert(req.clone());
                }
            }
        }
        let requirements_unfulfilled: Vec<String> = dedup_requirements
            .iter()
            .filter(|req| !requirements_fulfilled.contains(*req))
            .cloned()
            .collect();

        let mut protocol = Vec::new();
        let mut caution_warnings_count = 0usize;
        for candidate in &candidates {
            let has_intent = !candidate.matched_intent_codes.is_empty();
            let has_requirement = !candidate.fulfilled_reqs.is_empty();
            if !has_intent && !has_requirement {
                continue;
            }

            let reason = match (has_intent, has_requirement) {
                (true, true) => ProtocolReason::Both,
                (true, false) => ProtocolReason::IntentMatch,
                (false, true) => ProtocolReason::Requirement,
                (false, false) => unreachable!("filtered above"),
            };

            let match_score = if has_intent {
                round4(candidate.overlap_tags.len() as f64 / candidate.union_targets.len() as f64)
            } else {
                1.0
            };

            let priority_rank = candidate.matched_intent_priorities.iter().copied().min().unwrap_or(UNRANKED_PRIORITY);

            let mut matched_ingredients: BTreeSet<String> = candidate.overlap_tags.clone();
            matched_ingredients.extend(candidate.fulfilled_reqs.iter().cloned());

            let mut warnings = candidate.sku.caution_reasons.clone();
            warnings.sort();
            if !warnings.is_empty() {
                caution_warnings_count += 1;
            }

            protocol.push(ProtocolItem {
                sku_id: candidate.sku.sku_id.clone(),
                product_name: candidate.sku.product_name.clone(),
                matched_intents: candidate.matched_intent_codes.iter().cloned().collect(),
                matched_ingredients: matched_ingredients.into_iter().collect(),
                match_score,
                reason,
                warnings,
                priority_rank,
            });
        }

        protocol.sort_by(|a, b| {
            a.priority_rank
                .cmp(&b.priority_rank)
                .then_with(|| b.match_score.partial_cmp(&a.match_score).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| a.sku_id.cmp(&b.sku_id))
        });

        let protocol_ids: Vec<String> = protocol.iter().map(|p| p.sku_id.clone()).collect();
        let unmatched_codes: Vec<String> = unmatched_intents.iter().map(|u| u.code.clone()).collect();
        let match_hash = bloodgate_audit::stable_hash(&(&protocol_ids, &unmatched_codes));

        tracing::info!(
            protocol_items = protocol.len(),
            unmatched_intents = unmatched_intents.len(),
            requirements_unfulfilled = requirements_unfulfilled.len(),
            "matcher stage complete"
        );

        MatchingResult {
            audit: MatchingAudit {
                total_allowed_skus: allowed.len(),
                gender_filtered_count,
                intents_processed: intents.len(),
                intents_matched: intents.len() - unmatched_intents.len(),
                intents_unmatched: unmatched_intents.len(),
                requirements_total: dedup_requirements.len(),
                requirements_fulfilled: requirements_fulfilled.into_iter().collect(),
                requirements_unfulfilled,
                protocol_items_count: protocol.len(),
                caution_warnings_count,
            },
            protocol,
            unmatched_intents,
            match_hash,
        }
    }

    fn matching_version(&self) -> &str {
        &self.matching_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodgate_contracts::catalog::{EvidenceTier, ProductLine};
    use bloodgate_contracts::intent::{IntentSource, Sex};

    fn sku(sku_id: &str, tags: &[&str], product_line: Option<ProductLine>) -> AllowedSku {
        AllowedSku {
            sku_id: sku_id.to_string(),
            product_name: sku_id.to_string(),
            ingredient_tags: tags.iter().map(|s| s.to_string()).collect(),
            category_tags: Vec::new(),
            product_line,
            evidence_tier: EvidenceTier::Tier1,
            caution_flags: Vec::new(),
            caution_reasons: Vec::new(),
            fulfills_requirements: Vec::new(),
        }
    }

    fn intent(code: &str, priority: u32, targets: &[&str]) -> Intent {
        Intent {
            code: code.to_string(),
            priority,
            ingredient_targets: targets.iter().map(|s| s.to_string()).collect(),
            source: IntentSource::Goal,
        }
    }

    fn user() -> UserContext {
        UserContext::new(Sex::Male, None)
    }

    #[test]
    fn sku_matching_intent_enters_protocol_with_intent_match_reason() {
        let matcher = IntentMatcher::default();
        let allowed = vec![sku("sku-1", &["omega3"], None)];
        let intents = vec![intent("energy", 1, &["omega3"])];
        let result = matcher.match_protocol(&allowed, &intents, &user(), &[]);
        assert_eq!(result.protocol.len(), 1);
        assert_eq!(result.protocol[0].reason, bloodgate_contracts::protocol::ProtocolReason::IntentMatch);
        assert_eq!(result.protocol[0].match_score, 1.0);
    }

    #[test]
    fn unmatched_intent_gets_fixed_reason_string() {
        let matcher = IntentMatcher::default();
        let allowed = vec![sku("sku-1", &["omega3"], None)];
        let intents = vec![intent("focus", 1, &["lions_mane"])];
        let result = matcher.match_protocol(&allowed, &intents, &user(), &[]);
        assert!(result.protocol.is_empty());
        assert_eq!(result.unmatched_intents.len(), 1);
        assert_eq!(result.unmatched_intents[0].reason, "No SKU with matching ingredient tags available");
    }

    #[test]
    fn pure_requirement_fulfillment_gets_unranked_priority_and_full_score() {
        let matcher = IntentMatcher::default();
        let allowed = vec![sku("sku-1", &["zinc"], None)];
        let result = matcher.match_protocol(&allowed, &[], &user(), &["zinc".to_string()]);
        assert_eq!(result.protocol.len(), 1);
        assert_eq!(result.protocol[0].priority_rank, UNRANKED_PRIORITY);
        assert_eq!(result.protocol[0].match_score, 1.0);
        assert_eq!(result.protocol[0].reason, bloodgate_contracts::protocol::ProtocolReason::Requirement);
    }

    #[test]
    fn sku_matching_both_intent_and_requirement_gets_both_reason() {
        let matcher = IntentMatcher::default();
        let allowed = vec![sku("sku-1", &["omega3"], None)];
        let intents = vec![intent("energy", 1, &["omega3"])];
        let result = matcher.match_protocol(&allowed, &intents, &user(), &["omega3".to_string()]);
        assert_eq!(result.protocol[0].reason, bloodgate_contracts::protocol::ProtocolReason::Both);
        assert_eq!(result.protocol[0].priority_rank, 1);
    }

    #[test]
    fn gender_filter_excludes_mismatched_product_line() {
        let matcher = IntentMatcher::default();
        let allowed = vec![sku("sku-1", &["omega3"], Some(ProductLine::Female))];
        let intents = vec![intent("energy", 1, &["omega3"])];
        let result = matcher.match_protocol(&allowed, &intents, &user(), &[]);
        assert!(result.protocol.is_empty());
        assert_eq!(result.audit.gender_filtered_count, 1);
    }

    #[test]
    fn protocol_sorted_by_priority_then_score_then_sku_id() {
        let matcher = IntentMatcher::default();
        let allowed = vec![
            sku("sku-b", &["omega3"], None),
            sku("sku-a", &["omega3", "epa_dha"], None),
        ];
        let intents = vec![intent("energy", 1, &["omega3", "epa_dha"])];
        let result = matcher.match_protocol(&allowed, &intents, &user(), &[]);
        assert_eq!(result.protocol[0].sku_id, "sku-a");
        assert_eq!(result.protocol[1].sku_id, "sku-b");
    }

    #[test]
    fn same_inputs_produce_identical_match_hash() {
        let matcher = IntentMatcher::default();
        let allowed = vec![sku("sku-1", &["omega3"], None)];
        let intents = vec![intent("energy", 1, &["omega3"])];
        let a = matcher.match_protocol(&allowed, &intents, &user(), &[]);
        let b = matcher.match_protocol(&allowed, &intents, &user(), &[]);
        assert_eq!(a.match_hash, b.match_hash);
    }
}
