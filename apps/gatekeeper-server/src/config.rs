//! Layered application configuration.

use std::path::Path;

use api_gateway::ApiGatewayConfig;
use authn_gate::AuthNGateConfig;
use authz_gate::AuthZGateConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use static_authority_plugin::StaticAuthorityConfig;
use static_permission_plugin::StaticPermissionConfig;

/// Environment variables with this prefix override file values;
/// `__` separates nested keys (`GATEKEEPER__SERVER__BIND_ADDR`).
pub const ENV_PREFIX: &str = "GATEKEEPER__";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub server: ApiGatewayConfig,
    pub housekeeping: HousekeepingConfig,
    pub authn: AuthNGateConfig,
    pub authz: AuthZGateConfig,
    pub static_authority: StaticAuthorityConfig,
    pub static_permissions: StaticPermissionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HousekeepingConfig {
    /// How often expired cache entries are swept. `0` disables the sweep.
    pub purge_interval_secs: u64,
}

impl Default for HousekeepingConfig {
    fn default() -> Self {
        Self {
            purge_interval_secs: 60,
        }
    }
}

/// Defaults, then the YAML file if given, then environment overrides.
///
/// # Errors
///
/// Fails if the file is unreadable or any layer does not fit [`AppConfig`].
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }
    let cfg = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(cfg)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::path::PathBuf;

    use figment::Jail;
    use static_authority_plugin::AuthorityMode;

    use super::*;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let cfg = load(None).expect("defaults load");
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080");
            assert!(cfg.server.require_auth_by_default);
            assert!(cfg.authz.enabled);
            assert_eq!(cfg.logging.level, "info");
            assert_eq!(cfg.housekeeping.purge_interval_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "gatekeeper.yaml",
                r#"
server:
  bind_addr: 0.0.0.0:9000
authn:
  leeway_secs: 5
authz:
  policies:
    products.update:
      operator: and
      permissions: ["Product:Update", "Stock:Update"]
static_authority:
  mode: static_tokens
  tokens: [abc]
"#,
            )?;
            let cfg = load(Some(&PathBuf::from("gatekeeper.yaml"))).expect("file loads");
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
            assert_eq!(cfg.authn.leeway_secs, 5);
            assert_eq!(
                cfg.authz.policies["products.update"].permissions,
                ["Product:Update", "Stock:Update"]
            );
            assert_eq!(cfg.static_authority.mode, AuthorityMode::StaticTokens);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("gatekeeper.yaml", "authz:\n  enabled: true\n")?;
            jail.set_env("GATEKEEPER__AUTHZ__ENABLED", "false");
            jail.set_env("GATEKEEPER__LOGGING__LEVEL", "debug");
            let cfg = load(Some(&PathBuf::from("gatekeeper.yaml"))).expect("env applies");
            assert!(!cfg.authz.enabled);
            assert_eq!(cfg.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("gatekeeper.yaml", "server:\n  port: 8080\n")?;
            assert!(load(Some(&PathBuf::from("gatekeeper.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn shipped_sample_config_loads() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "gatekeeper.yaml",
                include_str!("../../../config/gatekeeper.yaml"),
            )?;
            let cfg = load(Some(&PathBuf::from("gatekeeper.yaml"))).expect("sample loads");
            assert_eq!(cfg.authz.policies.len(), 2);
            assert_eq!(cfg.static_authority.mode, AuthorityMode::AcceptAll);
            assert_eq!(cfg.static_permissions.subjects["alice"].len(), 3);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(load(Some(&PathBuf::from("absent.yaml"))).is_err());
            Ok(())
        });
    }
}
