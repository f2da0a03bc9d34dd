//! Static permission source wiring.

use std::sync::Arc;

use authz_gate_sdk::{PermissionSource, PermissionSourceError, PermissionRequirement};
use tracing::info;

use crate::config::StaticPermissionConfig;
use crate::domain::Service;

/// Builds the permission source from configuration.
///
/// # Errors
///
/// `Internal` if a configured capability is not of the form `Module:Action`.
#[tracing::instrument(skip_all)]
pub fn init(cfg: &StaticPermissionConfig) -> Result<Arc<dyn PermissionSource>, PermissionSourceError> {
    let configured = cfg
        .default_capabilities
        .iter()
        .chain(cfg.subjects.values().flatten());
    for capability in configured {
        capability
            .parse::<PermissionRequirement>()
            .map_err(|e| PermissionSourceError::Internal(e.to_string()))?;
    }

    info!(
        default_count = cfg.default_capabilities.len(),
        subject_count = cfg.subjects.len(),
        "Static permission source initialized"
    );

    Ok(Arc::new(Service::from_config(cfg)))
}
