//! Domain errors for the `AuthZ` gate.

use authz_gate_sdk::{AuthZGateError, PermissionSourceError};
use gatekeeper_cache::CacheError;

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("subject '{subject_id}' lacks permission for operation '{operation}'")]
    InsufficientPermission {
        subject_id: String,
        operation: String,
    },

    #[error("anonymous caller for permission-protected operation '{operation}'")]
    AnonymousCaller { operation: String },

    #[error("permission source unavailable: {0}")]
    PermissionSourceUnavailable(#[source] PermissionSourceError),

    #[error("capability resolution aborted")]
    ResolutionAborted,
}

impl From<CacheError<PermissionSourceError>> for DomainError {
    fn from(e: CacheError<PermissionSourceError>) -> Self {
        match e {
            CacheError::Compute(e) => Self::PermissionSourceUnavailable(e),
            CacheError::Aborted => Self::ResolutionAborted,
        }
    }
}

impl From<DomainError> for AuthZGateError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InsufficientPermission { .. } | DomainError::AnonymousCaller { .. } => {
                Self::InsufficientPermission
            }
            DomainError::PermissionSourceUnavailable(e) => {
                Self::PermissionSourceUnavailable(e.to_string())
            }
            DomainError::ResolutionAborted => {
                Self::PermissionSourceUnavailable("capability resolution aborted".to_owned())
            }
        }
    }
}
