use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

/// API gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayConfig {
    pub bind_addr: String,

    /// If true, routes without an explicit requirement still require
    /// authentication. Unknown routes are then rejected with 401 before 404.
    pub require_auth_by_default: bool,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            require_auth_by_default: true,
        }
    }
}
