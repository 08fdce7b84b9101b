//! Hashing and audit-trail utilities shared by every stage.
//!
//! `hash` computes the stage/pipeline hashes named throughout the external
//! interface. `chain` is a separate, heavier-weight tamper-evident log the
//! transport layer may use for its append-only audit tables; the core
//! pipeline depends only on `hash`.

pub mod chain;
pub mod hash;

pub use hash::{stable_hash, stable_hash_of_parts};
