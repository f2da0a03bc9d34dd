//! `AuthN` gate wiring.

use std::sync::Arc;
use std::time::Duration;

use authn_gate_sdk::{AuthNGateClient, ValidationAuthorityClient};
use gatekeeper_cache::{CacheBackend, CacheTtlPolicy, ValidationCache};
use tracing::info;

use crate::config::AuthNGateConfig;
use crate::domain::{AuthNGateLocalClient, AuthenticationGate, CredentialParser};

/// Builds the gate and returns its public client.
///
/// `backend` stores validity verdicts; `authority` is consulted on misses.
#[tracing::instrument(skip_all, fields(leeway_secs = cfg.leeway_secs))]
pub fn init(
    cfg: &AuthNGateConfig,
    authority: Arc<dyn ValidationAuthorityClient>,
    backend: Arc<dyn CacheBackend<bool>>,
) -> Arc<dyn AuthNGateClient> {
    let ttl = CacheTtlPolicy::from(&cfg.cache);
    info!(
        min_ttl = ?ttl.min_ttl(),
        negative_ttl = ?ttl.negative_ttl(),
        "Initializing authn_gate"
    );

    let parser = CredentialParser::new(Duration::from_secs(cfg.leeway_secs));
    let cache = ValidationCache::new(backend, ttl);
    let svc = Arc::new(AuthenticationGate::new(parser, cache, authority));

    Arc::new(AuthNGateLocalClient::new(svc))
}
