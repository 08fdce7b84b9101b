//! Per-stage audit records. These are plain values: the core pipeline never
//! performs I/O to persist them. The transport layer appends them to its
//! own audit tables after the response is prepared (see §5, §9 — audit is a
//! value type emitted by each stage, not a side effect of a stateful writer).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageAuditRecord {
    pub run_id: Uuid,
    pub stage: String,
    pub counts: BTreeMap<String, u64>,
    pub input_hash: Option<String>,
    pub output_hash: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl StageAuditRecord {
    pub fn new(run_id: Uuid, stage: impl Into<String>) -> Self {
        StageAuditRecord {
            run_id,
            stage: stage.into(),
            counts: BTreeMap::new(),
            input_hash: None,
            output_hash: None,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn with_count(mut self, key: impl Into<String>, value: u64) -> Self {
        self.counts.insert(key.into(), value);
        self
    }

    pub fn with_hashes(mut self, input_hash: Option<String>, output_hash: Option<String>) -> Self {
        self.input_hash = input_hash;
        self.output_hash = output_hash;
        self
    }
}
