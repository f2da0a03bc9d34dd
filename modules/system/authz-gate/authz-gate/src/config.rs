//! Configuration for the `AuthZ` gate.

use std::collections::BTreeMap;

use authz_gate_sdk::LogicalOperator;
use gatekeeper_cache::CacheTtlConfig;
use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthZGateConfig {
    /// Operational kill-switch. When `false` every request is allowed.
    pub enabled: bool,

    /// Expiry settings for the capability cache.
    pub cache: CacheTtlConfig,

    /// Operation id to policy.
    pub policies: BTreeMap<String, PolicyConfig>,
}

impl Default for AuthZGateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache: CacheTtlConfig::default(),
            policies: BTreeMap::new(),
        }
    }
}

/// A policy as written in configuration.
///
/// ```yaml
/// products.update:
///   operator: and
///   permissions: ["Product:Update", "Stock:Update"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default)]
    pub operator: LogicalOperator,
    pub permissions: Vec<String>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn enabled_by_default() {
        let cfg: AuthZGateConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.enabled);
        assert!(cfg.policies.is_empty());
    }

    #[test]
    fn policies_default_to_or() {
        let cfg: AuthZGateConfig = serde_json::from_str(
            r#"{"policies":{"orders.list":{"permissions":["Customer:View","Order:View"]}}}"#,
        )
        .unwrap();
        let policy = &cfg.policies["orders.list"];
        assert_eq!(policy.operator, LogicalOperator::Or);
        assert_eq!(policy.permissions.len(), 2);
    }
}
