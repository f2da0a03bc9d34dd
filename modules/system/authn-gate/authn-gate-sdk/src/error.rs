//! Error types for the `AuthN` gate module.

use thiserror::Error;

/// Reasons a request fails authentication.
///
/// Every variant collapses to one generic response at the HTTP boundary;
/// the variant itself is only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthNGateError {
    /// No bearer credential was presented.
    #[error("missing bearer credential")]
    MissingCredential,

    /// The credential is not structurally valid.
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    /// The credential's own expiry claim has passed.
    #[error("credential expired")]
    ExpiredCredential,

    /// The validation authority reports the credential is no longer live.
    #[error("credential rejected by validation authority")]
    AuthorityRejected,

    /// The validation authority could not be reached. Fail-closed.
    #[error("validation authority unavailable: {0}")]
    AuthorityUnavailable(String),
}

impl AuthNGateError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::MalformedCredential(_) => "malformed_credential",
            Self::ExpiredCredential => "expired_credential",
            Self::AuthorityRejected => "authority_rejected",
            Self::AuthorityUnavailable(_) => "authority_unavailable",
        }
    }

    /// True when the failure is an outage rather than a rejected credential.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::AuthorityUnavailable(_))
    }
}

/// Failures reported by a validation authority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    /// Transport failure or 5xx from the authority.
    #[error("authority unavailable: {0}")]
    Unavailable(String),

    /// The authority did not answer in time.
    #[error("authority timed out")]
    Timeout,

    /// Unexpected failure inside the authority client.
    #[error("internal error: {0}")]
    Internal(String),
}
