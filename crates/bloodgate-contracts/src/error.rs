use thiserror::Error;

/// The one error type threaded through every stage boundary and the
/// orchestrator. Each variant carries the structured detail its `kind`
/// requires; messages never include raw biomarker values.
#[derive(Debug, Error)]
pub enum BloodgateError {
    #[error("invalid input at '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    #[error("deadline exceeded after {elapsed_ms}ms (limit {limit_ms}ms)")]
    DeadlineExceeded { elapsed_ms: u64, limit_ms: u64 },

    #[error("internal invariant violated: {reason}")]
    InternalInvariant { reason: String },

    #[error("ruleset misconfiguration: {reason}")]
    RulesetMisconfigured { reason: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

pub type BloodgateResult<T> = Result<T, BloodgateError>;

impl BloodgateError {
    /// The stable `kind` code carried in every user-visible error (§7).
    pub fn kind(&self) -> &'static str {
        match self {
            BloodgateError::InvalidInput { .. } => "INVALID_INPUT",
            BloodgateError::CatalogUnavailable { .. } => "CATALOG_UNAVAILABLE",
            BloodgateError::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
            BloodgateError::InternalInvariant { .. } => "INTERNAL_INVARIANT",
            BloodgateError::RulesetMisconfigured { .. } => "RULESET_MISCONFIGURED",
            BloodgateError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = BloodgateError::InvalidInput {
            field: "panel[0].value".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.kind(), "INVALID_INPUT");
        assert!(err.to_string().contains("panel[0].value"));
    }

    #[test]
    fn deadline_exceeded_message_has_no_raw_values() {
        let err = BloodgateError::DeadlineExceeded {
            elapsed_ms: 120,
            limit_ms: 100,
        };
        assert_eq!(err.kind(), "DEADLINE_EXCEEDED");
        assert_eq!(err.to_string(), "deadline exceeded after 120ms (limit 100ms)");
    }
}
