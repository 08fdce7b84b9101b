//! Tamper-evident hash chaining for the append-only audit tables the
//! transport layer maintains (§6, §9). The core pipeline never calls this —
//! it only emits `StageAuditRecord` values. A transport layer persisting
//! those values into an append-only table uses `hash_event`/`verify_chain`
//! to make tampering detectable, the same way the pipeline's own stage
//! hashes make a changed constraint set detectable.

use bloodgate_contracts::audit::StageAuditRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Sentinel previous-hash for the first event appended for a given run.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub sequence: u64,
    pub run_id: Uuid,
    pub record: StageAuditRecord,
    pub prev_hash: String,
    pub this_hash: String,
}

/// Computes the hash for one chain link.
///
/// Byte layout fed to SHA-256: run_id (UTF-8 bytes of its hyphenated form),
/// sequence (8-byte little-endian), prev_hash (UTF-8 hex characters),
/// canonical JSON of `record` (`serde_json::to_vec`, fixed struct field
/// order). The digest is rendered as lowercase hex.
pub fn hash_event(run_id: Uuid, sequence: u64, record: &StageAuditRecord, prev_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(run_id.to_string().as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    let record_bytes = serde_json::to_vec(record).expect("audit record must serialize");
    hasher.update(&record_bytes);
    hex::encode(hasher.finalize())
}

/// Appends one record to a chain, returning the new event.
pub fn append(events: &[AuditEvent], run_id: Uuid, record: StageAuditRecord) -> AuditEvent {
    let sequence = events.len() as u64;
    let prev_hash = events
        .last()
        .map(|e| e.this_hash.clone())
        .unwrap_or_else(|| GENESIS_HASH.to_string());
    let this_hash = hash_event(run_id, sequence, &record, &prev_hash);
    AuditEvent {
        sequence,
        run_id,
        record,
        prev_hash,
        this_hash,
    }
}

/// Verifies both prev-hash linkage and recomputed-hash correctness.
/// An empty slice is trivially valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = GENESIS_HASH.to_string();
    for event in events {
        if event.prev_hash != expected_prev {
            return false;
        }
        let recomputed = hash_event(event.run_id, event.sequence, &event.record, &event.prev_hash);
        if recomputed != event.this_hash {
            return false;
        }
        expected_prev = event.this_hash.clone();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stage: &str) -> StageAuditRecord {
        StageAuditRecord::new(Uuid::nil(), stage)
    }

    #[test]
    fn empty_chain_verifies() {
        assert!(verify_chain(&[]));
    }

    #[test]
    fn sequential_appends_verify() {
        let run_id = Uuid::nil();
        let mut events = Vec::new();
        events.push(append(&events, run_id, record("normalize")));
        events.push(append(&events, run_id, record("gate")));
        events.push(append(&events, run_id, record("translate")));
        assert!(verify_chain(&events));
        assert_eq!(events[0].prev_hash, GENESIS_HASH);
    }

    #[test]
    fn tamper_detection() {
        let run_id = Uuid::nil();
        let mut events = Vec::new();
        events.push(append(&events, run_id, record("normalize")));
        events.push(append(&events, run_id, record("gate")));
        assert!(verify_chain(&events));

        events[0].record.counts.insert("tampered".to_string(), 1);
        assert!(!verify_chain(&events));
    }
}
