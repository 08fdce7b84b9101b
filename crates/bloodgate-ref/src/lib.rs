//! Versioned, process-wide read-only documents the bloodgate pipeline loads
//! once at startup: the biomarker reference-range/conversion table, the gate
//! registry's metadata, and the constraint-code mapping. Each is loadable
//! from TOML via a `from_toml_str`/`from_file` constructor pair, mirroring
//! how the reference workspace's policy engine loads its rule table — and
//! each ships a `bundled()` default built from the documents under `data/`.

pub mod constraint_mapping;
pub mod gate_metadata;
pub mod reference_range;

pub use constraint_mapping::{ConstraintMappingRow, ConstraintMappingTable};
pub use gate_metadata::{GateMetadata, GateMetadataTable};
pub use reference_range::{MarkerDefinition, MarkerKind, RangeTable};
