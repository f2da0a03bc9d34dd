//! Authentication gate service.

use std::sync::Arc;

use authn_gate_sdk::{AuthRequirement, AuthorityError, ValidationAuthorityClient};
use chrono::Utc;
use gatekeeper_cache::ValidationCache;
use gatekeeper_security::{CacheKey, Identity};

use super::{CredentialParser, DomainError};

/// Authenticates requests: parse, then cached validation against the authority.
///
/// Authority failures reject the request (fail-closed). Cache backend
/// failures do not; the authority is then consulted directly.
pub struct AuthenticationGate {
    parser: CredentialParser,
    cache: ValidationCache<AuthorityError>,
    authority: Arc<dyn ValidationAuthorityClient>,
}

impl AuthenticationGate {
    #[must_use]
    pub fn new(
        parser: CredentialParser,
        cache: ValidationCache<AuthorityError>,
        authority: Arc<dyn ValidationAuthorityClient>,
    ) -> Self {
        Self {
            parser,
            cache,
            authority,
        }
    }

    /// Resolves the request's identity.
    ///
    /// # Errors
    ///
    /// Returns the [`DomainError`] naming why the request was rejected.
    pub async fn authenticate(
        &self,
        requirement: AuthRequirement,
        authorization: Option<&str>,
    ) -> Result<Identity, DomainError> {
        if requirement == AuthRequirement::None {
            tracing::trace!("anonymous access allowed, credential not inspected");
            return Ok(Identity::anonymous());
        }

        let now = Utc::now();
        let credential = self.parser.parse(authorization, now)?;
        let key = CacheKey::for_credential(credential.raw());

        let authority = Arc::clone(&self.authority);
        let raw = credential.raw().clone();
        let valid = self
            .cache
            .get_or_validate(
                key,
                move || async move { authority.validate_credential(&raw).await },
                credential.remaining_lifetime(now),
            )
            .await?;

        if !valid {
            return Err(DomainError::AuthorityRejected { key });
        }

        tracing::debug!(subject_id = credential.subject_id(), %key, "credential accepted");
        Ok(credential.into_identity())
    }

    /// Drops the cached verdict for the presented credential and returns
    /// the identity it names, so derived entries can be dropped too.
    ///
    /// The expiry is not checked and the authority is not consulted, so an
    /// expired or revoked credential can still be logged out.
    ///
    /// # Errors
    ///
    /// `MissingCredential` or `MalformedCredential` if no decodable bearer
    /// token is presented.
    pub async fn logout(&self, authorization: Option<&str>) -> Result<Identity, DomainError> {
        let credential = CredentialParser::decode(authorization)?;
        let key = CacheKey::for_credential(credential.raw());
        self.cache.invalidate(&key).await;
        tracing::debug!(subject_id = credential.subject_id(), %key, "credential logged out");
        Ok(credential.into_identity())
    }

    /// Number of validations currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.cache.in_flight()
    }
}
