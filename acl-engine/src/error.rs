//! Error types for policy loading
//!
//! The engine's own operations never fail: unknown roles, resources and
//! permissions are no-ops or contribute nothing. Errors only arise at the
//! boundary where a policy document is read, parsed and validated.

use thiserror::Error;

/// ACL error types.
#[derive(Debug, Error)]
pub enum AclError {
    /// Policy file could not be read
    #[error("Failed to read policy file `{path}`: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Policy document is not valid JSON for the expected shape
    #[error("Malformed policy document: {0}")]
    Json(#[from] serde_json::Error),

    /// Required environment variable is not set
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Policy document parsed but breaks an invariant
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Result type for ACL operations.
pub type AclResult<T> = Result<T, AclError>;

impl AclError {
    /// Check if this error stems from the environment rather than the input.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AclError::Io { .. } | AclError::MissingEnvVar(_))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AclError::Io { .. } => "POLICY_IO_ERROR",
            AclError::Json(_) => "MALFORMED_POLICY",
            AclError::MissingEnvVar(_) => "MISSING_ENV_VAR",
            AclError::InvalidPolicy(_) => "INVALID_POLICY",
        }
    }
}
