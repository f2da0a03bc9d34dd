//! Public API trait for the `AuthN` gate.

use async_trait::async_trait;
use gatekeeper_security::Identity;

use crate::error::AuthNGateError;
use crate::models::AuthRequirement;

/// Public API trait for the `AuthN` gate.
///
/// Consumed by the API gateway. The returned [`Identity`] is the only
/// channel through which the authenticated caller reaches downstream code.
#[async_trait]
pub trait AuthNGateClient: Send + Sync {
    /// Authenticate the raw `Authorization` header value of a request.
    ///
    /// # Arguments
    ///
    /// * `requirement` - whether the operation allows anonymous callers
    /// * `authorization` - the header value, `None` when absent
    ///
    /// # Errors
    ///
    /// - `MissingCredential` if no bearer credential was presented
    /// - `MalformedCredential` if the credential is not structurally valid
    /// - `ExpiredCredential` if the credential's own expiry has passed
    /// - `AuthorityRejected` if the validation authority reports it revoked
    /// - `AuthorityUnavailable` if the validation authority could not answer
    async fn authenticate(
        &self,
        requirement: AuthRequirement,
        authorization: Option<&str>,
    ) -> Result<Identity, AuthNGateError>;

    /// Forget the cached verdict for the presented credential immediately.
    ///
    /// Expired and revoked credentials are accepted. Returns the identity
    /// the credential names.
    ///
    /// # Errors
    ///
    /// - `MissingCredential` if no bearer credential was presented
    /// - `MalformedCredential` if the credential is not structurally valid
    async fn logout(&self, authorization: Option<&str>) -> Result<Identity, AuthNGateError>;
}

