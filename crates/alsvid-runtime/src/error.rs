//! Error types for the runtime client.

use thiserror::Error;

/// Errors that can occur when configuring or dispatching a runtime
/// program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuntimeError {
    /// Optimizer name outside the supported set.
    #[error("Unsupported optimizer '{0}'. Only SPSA and QN-SPSA are supported.")]
    UnsupportedOptimizer(String),

    /// Provider that does not expose a runtime service.
    #[error("The provider does not expose a runtime service")]
    InvalidProvider,

    /// Dispatch attempted before a backend was set.
    #[error("The backend has not been set")]
    MissingBackend,

    /// Dispatch attempted before a provider was set.
    #[error("The provider has not been set")]
    MissingProvider,

    /// Optimizer settings with keys outside the allow-list.
    #[error(
        "The following settings are unsupported for the {optimizer} optimizer: {}",
        .keys.join(", ")
    )]
    UnsupportedSettings {
        /// Wire name of the selected optimizer.
        optimizer: String,
        /// Offending keys, sorted.
        keys: Vec<String>,
    },

    /// Operator that cannot be normalized into a Pauli sum.
    #[error("Invalid operator: {0}")]
    InvalidOperator(#[from] alsvid_ir::IrError),

    /// Interim-result callback could not be delivered.
    #[error("Callback failed: {0}")]
    CallbackFailed(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error reported by the runtime service.
    #[error("Runtime service error: {0}")]
    Service(String),
}

/// Result type for runtime-client operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_settings_display_names_keys() {
        let err = RuntimeError::UnsupportedSettings {
            optimizer: "QN-SPSA".to_string(),
            keys: vec!["second_order".to_string(), "trust_region".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("QN-SPSA"));
        assert!(msg.contains("second_order, trust_region"));
    }

    #[test]
    fn test_ir_error_converts_to_invalid_operator() {
        let ir = alsvid_ir::IrError::EmptyOperator;
        let err: RuntimeError = ir.into();
        assert!(matches!(err, RuntimeError::InvalidOperator(_)));
        assert!(err.to_string().contains("Invalid operator"));
    }
}
