//! Local (in-process) client for the `AuthZ` gate.

use std::sync::Arc;

use async_trait::async_trait;
use authz_gate_sdk::{AuthZGateClient, AuthZGateError};
use gatekeeper_security::Identity;

use super::{AuthorizationGate, DomainError};

/// Local client wrapping the gate.
pub struct AuthZGateLocalClient {
    svc: Arc<AuthorizationGate>,
}

impl AuthZGateLocalClient {
    #[must_use]
    pub fn new(svc: Arc<AuthorizationGate>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthZGateError {
    match &e {
        DomainError::PermissionSourceUnavailable(_) | DomainError::ResolutionAborted => {
            tracing::error!(operation = op, error = %e, "authz_gate call failed");
        }
        DomainError::InsufficientPermission { .. } | DomainError::AnonymousCaller { .. } => {
            tracing::debug!(operation = op, error = %e, "authz_gate denied request");
        }
    }
    e.into()
}

#[async_trait]
impl AuthZGateClient for AuthZGateLocalClient {
    async fn authorize(&self, identity: &Identity, operation: &str) -> Result<(), AuthZGateError> {
        self.svc
            .authorize(identity, operation)
            .await
            .map_err(|e| log_and_convert("authorize", e))
    }

    async fn invalidate(&self, identity: &Identity) {
        self.svc.invalidate(identity).await;
    }
}
