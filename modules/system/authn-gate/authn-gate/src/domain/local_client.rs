//! Local (in-process) client for the `AuthN` gate.

use std::sync::Arc;

use async_trait::async_trait;
use authn_gate_sdk::{AuthNGateClient, AuthNGateError, AuthRequirement};
use gatekeeper_security::Identity;

use super::{AuthenticationGate, DomainError};

/// Local client wrapping the gate.
///
/// Handed to the API gateway by [`crate::module::init`].
pub struct AuthNGateLocalClient {
    svc: Arc<AuthenticationGate>,
}

impl AuthNGateLocalClient {
    #[must_use]
    pub fn new(svc: Arc<AuthenticationGate>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthNGateError {
    match &e {
        DomainError::AuthorityUnavailable(_) | DomainError::ValidationAborted => {
            tracing::error!(operation = op, error = %e, "authn_gate call failed");
        }
        _ => tracing::debug!(operation = op, error = %e, "authn_gate rejected request"),
    }
    e.into()
}

#[async_trait]
impl AuthNGateClient for AuthNGateLocalClient {
    async fn authenticate(
        &self,
        requirement: AuthRequirement,
        authorization: Option<&str>,
    ) -> Result<Identity, AuthNGateError> {
        self.svc
            .authenticate(requirement, authorization)
            .await
            .map_err(|e| log_and_convert("authenticate", e))
    }

    async fn logout(&self, authorization: Option<&str>) -> Result<Identity, AuthNGateError> {
        self.svc
            .logout(authorization)
            .await
            .map_err(|e| log_and_convert("logout", e))
    }
}
