//! Configuration for the `AuthN` gate.

use gatekeeper_cache::CacheTtlConfig;
use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNGateConfig {
    /// Seconds of clock skew tolerated when checking a credential's `exp`.
    pub leeway_secs: u64,

    /// Expiry settings for the credential-validity cache.
    pub cache: CacheTtlConfig,
}
