//! Authorization gate service.

use std::sync::Arc;

use authz_gate_sdk::{CapabilitySet, PermissionSource, PermissionSourceError, evaluate};
use chrono::Utc;
use gatekeeper_cache::{CacheBackend, CacheTtlPolicy, SingleFlightCache};
use gatekeeper_security::{CacheKey, Identity};
use tokio::time::Instant;

use super::{DomainError, PolicyRegistry};

/// Cached capability sets, shared between concurrent requests of one caller.
pub type CapabilityCache = SingleFlightCache<Arc<CapabilitySet>, PermissionSourceError>;

/// Enforces per-operation permission policies.
///
/// Permission source failures deny the request (fail-closed).
pub struct AuthorizationGate {
    enabled: bool,
    registry: Arc<PolicyRegistry>,
    cache: CapabilityCache,
    ttl: CacheTtlPolicy,
    source: Arc<dyn PermissionSource>,
}

impl AuthorizationGate {
    /// `enabled` is captured here; flipping it needs a new gate.
    #[must_use]
    pub fn new(
        enabled: bool,
        registry: Arc<PolicyRegistry>,
        source: Arc<dyn PermissionSource>,
        backend: Arc<dyn CacheBackend<Arc<CapabilitySet>>>,
        ttl: CacheTtlPolicy,
    ) -> Self {
        if !enabled {
            tracing::warn!(
                "Authorization is DISABLED: every authenticated request passes \
                 permission checks. This is an operational kill-switch, not a security boundary."
            );
        }
        Self {
            enabled,
            registry,
            cache: SingleFlightCache::new("capabilities", backend),
            ttl,
            source,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// # Errors
    ///
    /// Returns the [`DomainError`] naming why the request was denied.
    pub async fn authorize(&self, identity: &Identity, operation: &str) -> Result<(), DomainError> {
        if !self.enabled {
            tracing::trace!(operation, "authorization disabled, allowing");
            return Ok(());
        }

        let Some(policy) = self.registry.get(operation) else {
            tracing::trace!(operation, "no policy registered, operation unprotected");
            return Ok(());
        };

        let Some(credential) = identity.bearer_token() else {
            return Err(DomainError::AnonymousCaller {
                operation: operation.to_owned(),
            });
        };

        let subject_id = identity.subject_id().to_owned();
        let key = CacheKey::for_capabilities(&subject_id, credential);
        let ttl_policy = self.ttl;
        let remaining = identity.remaining_lifetime(Utc::now());
        let started = Instant::now();

        let source = Arc::clone(&self.source);
        let credential = credential.clone();
        let subject = subject_id.clone();
        let capabilities = self
            .cache
            .get_or_compute(
                key,
                move || async move {
                    let granted = source.resolve_capabilities(&subject, &credential).await?;
                    Ok::<_, PermissionSourceError>(Arc::new(
                        granted.into_iter().collect::<CapabilitySet>(),
                    ))
                },
                // resolution time counts against the credential's lifetime
                move |_| ttl_policy.positive_ttl(remaining.saturating_sub(started.elapsed())),
            )
            .await?;

        if evaluate(policy, &capabilities) {
            tracing::debug!(%subject_id, operation, "permission granted");
            Ok(())
        } else {
            Err(DomainError::InsufficientPermission {
                subject_id,
                operation: operation.to_owned(),
            })
        }
    }

    /// Drops the cached capabilities of `identity`.
    pub async fn invalidate(&self, identity: &Identity) {
        if let Some(credential) = identity.bearer_token() {
            let key = CacheKey::for_capabilities(identity.subject_id(), credential);
            self.cache.invalidate(&key).await;
        }
    }
}
