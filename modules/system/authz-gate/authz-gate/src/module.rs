//! `AuthZ` gate wiring.

use std::sync::Arc;

use anyhow::Context;
use authz_gate_sdk::{AuthZGateClient, CapabilitySet, PermissionSource};
use gatekeeper_cache::{CacheBackend, CacheTtlPolicy};
use tracing::info;

use crate::config::AuthZGateConfig;
use crate::domain::{AuthZGateLocalClient, AuthorizationGate, PolicyRegistry};

/// Builds the gate from configured policies and returns its public client.
///
/// # Errors
///
/// Fails if any configured policy is invalid.
#[tracing::instrument(skip_all, fields(enabled = cfg.enabled))]
pub fn init(
    cfg: &AuthZGateConfig,
    source: Arc<dyn PermissionSource>,
    backend: Arc<dyn CacheBackend<Arc<CapabilitySet>>>,
) -> anyhow::Result<Arc<dyn AuthZGateClient>> {
    let registry =
        PolicyRegistry::from_config(&cfg.policies).context("invalid authz policy configuration")?;
    Ok(init_with_registry(cfg, registry, source, backend))
}

/// Like [`init`], with a registry assembled in code.
pub fn init_with_registry(
    cfg: &AuthZGateConfig,
    registry: PolicyRegistry,
    source: Arc<dyn PermissionSource>,
    backend: Arc<dyn CacheBackend<Arc<CapabilitySet>>>,
) -> Arc<dyn AuthZGateClient> {
    info!(
        enabled = cfg.enabled,
        policy_count = registry.len(),
        "Initializing authz_gate"
    );

    let svc = Arc::new(AuthorizationGate::new(
        cfg.enabled,
        Arc::new(registry),
        source,
        backend,
        CacheTtlPolicy::from(&cfg.cache),
    ));

    Arc::new(AuthZGateLocalClient::new(svc))
}
