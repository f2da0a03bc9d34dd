//! Configuration for the static validation authority plugin.

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthorityConfig {
    /// Validation mode.
    pub mode: AuthorityMode,

    /// Live tokens for `static_tokens` mode.
    pub tokens: Vec<String>,

    /// Subjects whose credentials are always rejected.
    pub revoked_subjects: Vec<String>,
}

/// Validation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityMode {
    /// Every credential is live unless its subject is revoked.
    #[default]
    AcceptAll,
    /// Only configured tokens are live.
    StaticTokens,
}
