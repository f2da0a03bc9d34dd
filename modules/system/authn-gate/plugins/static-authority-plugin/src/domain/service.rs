//! Service implementation for the static validation authority plugin.

use std::collections::HashSet;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::{AuthorityMode, StaticAuthorityConfig};

type TokenDigest = [u8; 32];

#[derive(Deserialize)]
struct SubjectClaim {
    sub: String,
}

/// Static validation authority.
///
/// Never holds raw tokens: configured tokens are digested on load.
pub struct Service {
    mode: AuthorityMode,
    live_tokens: HashSet<TokenDigest>,
    revoked_subjects: HashSet<String>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthorityConfig) -> Self {
        Self {
            mode: cfg.mode,
            live_tokens: cfg.tokens.iter().map(String::as_str).map(digest).collect(),
            revoked_subjects: cfg.revoked_subjects.iter().cloned().collect(),
        }
    }

    /// Whether `token` is still live.
    #[must_use]
    pub fn is_live(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        if self.mode == AuthorityMode::StaticTokens && !self.live_tokens.contains(&digest(token)) {
            return false;
        }
        if self.revoked_subjects.is_empty() {
            return true;
        }
        // a subject that cannot be read cannot be cleared against the revocation list
        subject_of(token).is_some_and(|sub| !self.revoked_subjects.contains(&sub))
    }
}

fn digest(token: &str) -> TokenDigest {
    Sha256::digest(token.as_bytes()).into()
}

fn subject_of(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice::<SubjectClaim>(&bytes)
        .ok()
        .map(|claim| claim.sub)
}
