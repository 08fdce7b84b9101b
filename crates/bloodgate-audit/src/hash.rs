//! Stable hashing for stage/pipeline hashes (`input_hash`, `output_hash`,
//! `routing_hash`, `match_hash`, `pipeline_hash`).
//!
//! Every hash named in the external interface is SHA-256 over the canonical
//! JSON encoding of its inputs (object keys sorted, no whitespace),
//! truncated to its first 16 hex characters and prefixed `sha256:`. This is
//! distinct from the full 64-hex-character digests `chain` uses to secure
//! the append-only audit log — the two hashing schemes serve different
//! purposes and neither substitutes for the other.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hashes any serializable value into the `sha256:<16 hex chars>` form.
pub fn stable_hash<T: Serialize>(value: &T) -> String {
    let as_value = serde_json::to_value(value).expect("hash input must serialize to JSON");
    let canonical = canonicalize(&as_value);
    let digest = Sha256::digest(canonical.as_bytes());
    format!("sha256:{}", &hex::encode(digest)[..16])
}

/// Hashes a set of already-sorted string collections, joined in a fixed
/// order. Used where the spec names a hash as `H(sorted(a) ∥ sorted(b))`.
pub fn stable_hash_of_parts(parts: &[&[String]]) -> String {
    stable_hash(&parts)
}

fn canonicalize(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let entries: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", canonicalize(&Value::String(k.clone())), canonicalize(&map[k])))
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().map(canonicalize).collect();
            format!("[{}]", entries.join(","))
        }
        Value::String(s) => serde_json::to_string(s).expect("string serializes"),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_hash() {
        let a = vec!["b".to_string(), "a".to_string()];
        let h1 = stable_hash(&a);
        let h2 = stable_hash(&a);
        assert_eq!(h1, h2);
        assert!(h1.starts_with("sha256:"));
        assert_eq!(h1.len(), "sha256:".len() + 16);
    }

    #[test]
    fn key_order_does_not_affect_hash() {
        #[derive(Serialize)]
        struct A {
            x: u32,
            y: u32,
        }
        #[derive(Serialize)]
        struct B {
            y: u32,
            x: u32,
        }
        let a = A { x: 1, y: 2 };
        let b = B { y: 2, x: 1 };
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn different_input_different_hash() {
        let a = vec!["a".to_string()];
        let b = vec!["b".to_string()];
        assert_ne!(stable_hash(&a), stable_hash(&b));
    }
}
