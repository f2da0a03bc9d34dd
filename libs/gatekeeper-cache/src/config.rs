//! TTL configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_min_ttl_secs() -> u64 {
    1
}

fn default_negative_ttl_secs() -> u64 {
    30
}

/// Cache expiry settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheTtlConfig {
    /// Positive results whose credential has less lifetime left than this are not cached.
    pub min_ttl_secs: u64,
    /// How long a rejection stays cached, regardless of the credential's claimed expiry.
    pub negative_ttl_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            min_ttl_secs: default_min_ttl_secs(),
            negative_ttl_secs: default_negative_ttl_secs(),
        }
    }
}

/// Expiry discipline for credential-derived entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlPolicy {
    min_ttl: Duration,
    negative_ttl: Duration,
}

impl Default for CacheTtlPolicy {
    fn default() -> Self {
        Self::from(&CacheTtlConfig::default())
    }
}

impl From<&CacheTtlConfig> for CacheTtlPolicy {
    fn from(cfg: &CacheTtlConfig) -> Self {
        Self::new(
            Duration::from_secs(cfg.min_ttl_secs),
            Duration::from_secs(cfg.negative_ttl_secs),
        )
    }
}

impl CacheTtlPolicy {
    #[must_use]
    pub fn new(min_ttl: Duration, negative_ttl: Duration) -> Self {
        Self {
            min_ttl,
            negative_ttl,
        }
    }

    #[must_use]
    pub fn min_ttl(&self) -> Duration {
        self.min_ttl
    }

    #[must_use]
    pub fn negative_ttl(&self) -> Duration {
        self.negative_ttl
    }

    /// TTL for a positive result: the credential's remaining lifetime, or
    /// `None` (do not cache) when that is below the floor.
    #[must_use]
    pub fn positive_ttl(&self, remaining_lifetime: Duration) -> Option<Duration> {
        (remaining_lifetime >= self.min_ttl && !remaining_lifetime.is_zero())
            .then_some(remaining_lifetime)
    }

    /// TTL for a validity verdict.
    #[must_use]
    pub fn validity_ttl(&self, valid: bool, remaining_lifetime: Duration) -> Option<Duration> {
        if valid {
            self.positive_ttl(remaining_lifetime)
        } else {
            Some(self.negative_ttl)
        }
    }
}
