//! Error types for the `AuthZ` gate module.

use thiserror::Error;

/// Reasons a request fails authorization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthZGateError {
    /// The caller's capabilities do not satisfy the operation's policy.
    #[error("insufficient permission")]
    InsufficientPermission,

    /// Capabilities could not be resolved. Fail-closed.
    #[error("permission source unavailable: {0}")]
    PermissionSourceUnavailable(String),
}

/// Failures reported by a permission source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionSourceError {
    #[error("permission source unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Invalid policy definitions, rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("policy lists no permissions")]
    Empty,

    #[error("permission '{0}' is not of the form Module:Action")]
    InvalidPermission(String),

    #[error("operation '{0}' already has a policy")]
    DuplicateOperation(String),

    #[error("operation id must not be empty")]
    EmptyOperation,

    #[error("policy for operation '{operation}' is invalid: {source}")]
    InvalidPolicy {
        operation: String,
        #[source]
        source: Box<PolicyError>,
    },
}
