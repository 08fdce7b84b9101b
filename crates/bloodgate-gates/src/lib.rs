//! Component B: the tiered safety gate engine (§4.B).
//!
//! `GateRegistry` evaluates every gate in the bundled registry against a
//! request's normalized markers, producing the sorted set of constraint
//! codes Component C translates. Gate order never affects the result — the
//! engine unions every gate's contribution — so the registry iterates its
//! metadata in `gate_id` order purely for deterministic logging and
//! `active_gates` ordering, not because order matters semantically.

mod lookup;
mod predicates;
mod registry;

pub use registry::GateRegistry;
