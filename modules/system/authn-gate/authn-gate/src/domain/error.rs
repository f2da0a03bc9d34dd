//! Domain errors for the `AuthN` gate.

use authn_gate_sdk::{AuthNGateError, AuthorityError};
use chrono::{DateTime, Utc};
use gatekeeper_cache::CacheError;
use gatekeeper_security::CacheKey;

/// Internal domain errors.
///
/// Carries more detail than [`AuthNGateError`] for logging. Nothing here
/// holds the raw credential; credentials are referred to by digest.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("malformed credential: {reason}")]
    MalformedCredential { reason: String },

    #[error("credential for '{subject_id}' expired at {expired_at}")]
    ExpiredCredential {
        subject_id: String,
        expired_at: DateTime<Utc>,
    },

    #[error("credential {key} rejected by validation authority")]
    AuthorityRejected { key: CacheKey },

    #[error("validation authority unavailable: {0}")]
    AuthorityUnavailable(#[source] AuthorityError),

    #[error("credential validation aborted")]
    ValidationAborted,
}

impl DomainError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCredential {
            reason: reason.into(),
        }
    }
}

impl From<CacheError<AuthorityError>> for DomainError {
    fn from(e: CacheError<AuthorityError>) -> Self {
        match e {
            CacheError::Compute(e) => Self::AuthorityUnavailable(e),
            CacheError::Aborted => Self::ValidationAborted,
        }
    }
}

impl From<DomainError> for AuthNGateError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingCredential => Self::MissingCredential,
            DomainError::MalformedCredential { reason } => Self::MalformedCredential(reason),
            DomainError::ExpiredCredential { .. } => Self::ExpiredCredential,
            DomainError::AuthorityRejected { .. } => Self::AuthorityRejected,
            DomainError::AuthorityUnavailable(e) => Self::AuthorityUnavailable(e.to_string()),
            DomainError::ValidationAborted => {
                Self::AuthorityUnavailable("validation aborted".to_owned())
            }
        }
    }
}
