//! Static validation authority wiring.

use std::sync::Arc;

use authn_gate_sdk::ValidationAuthorityClient;
use tracing::info;

use crate::config::{AuthorityMode, StaticAuthorityConfig};
use crate::domain::Service;

/// Builds the authority from configuration.
#[tracing::instrument(skip_all, fields(mode = ?cfg.mode))]
pub fn init(cfg: &StaticAuthorityConfig) -> Arc<dyn ValidationAuthorityClient> {
    if cfg.mode == AuthorityMode::AcceptAll {
        tracing::warn!(
            "Static validation authority is running in `accept_all` mode: \
             every structurally valid, unexpired credential is treated as live. \
             Do NOT use this mode in production."
        );
    }

    info!(
        token_count = cfg.tokens.len(),
        revoked_subject_count = cfg.revoked_subjects.len(),
        "Static validation authority initialized"
    );

    Arc::new(Service::from_config(cfg))
}
