//! Digest-based cache keys.
//!
//! Every cache entry derived from a credential is keyed by a SHA-256 digest,
//! never by the credential itself. Each key kind hashes under its own
//! namespace so a validity entry can never be read as a capability entry.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

const CREDENTIAL_NAMESPACE: &[u8] = b"gatekeeper.credential-validity.v1";
const CAPABILITY_NAMESPACE: &[u8] = b"gatekeeper.capabilities.v1";

/// Number of digest bytes shown by `Display`.
const SHORT_LEN: usize = 8;

/// Fixed-length, irreversible cache key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    /// Key for the validity entry of a raw credential.
    #[must_use]
    pub fn for_credential(raw: &SecretString) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(CREDENTIAL_NAMESPACE);
        hasher.update([0u8]);
        hasher.update(raw.expose_secret().as_bytes());
        Self::from_digest(&hasher.finalize())
    }

    /// Key for the capability set resolved for `(subject_id, raw)`.
    #[must_use]
    pub fn for_capabilities(subject_id: &str, raw: &SecretString) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(CAPABILITY_NAMESPACE);
        hasher.update([0u8]);
        // length prefix keeps (subject, token) pairs unambiguous
        hasher.update((subject_id.len() as u64).to_le_bytes());
        hasher.update(subject_id.as_bytes());
        hasher.update(raw.expose_secret().as_bytes());
        Self::from_digest(&hasher.finalize())
    }

    fn from_digest(digest: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(digest);
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Short hex prefix, safe for logs.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0[..SHORT_LEN]))
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({self})")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn same_credential_same_key() {
        assert_eq!(
            CacheKey::for_credential(&secret("abc")),
            CacheKey::for_credential(&secret("abc"))
        );
        assert_ne!(
            CacheKey::for_credential(&secret("abc")),
            CacheKey::for_credential(&secret("abd"))
        );
    }

    #[test]
    fn namespaces_do_not_collide() {
        let raw = secret("abc");
        assert_ne!(
            CacheKey::for_credential(&raw),
            CacheKey::for_capabilities("", &raw)
        );
    }

    #[test]
    fn capability_key_depends_on_subject_and_credential() {
        let raw = secret("abc");
        let base = CacheKey::for_capabilities("user-1", &raw);

        assert_ne!(base, CacheKey::for_capabilities("user-2", &raw));
        assert_ne!(base, CacheKey::for_capabilities("user-1", &secret("abd")));
        // moving bytes between subject and token must change the key
        assert_ne!(
            CacheKey::for_capabilities("ab", &secret("c")),
            CacheKey::for_capabilities("a", &secret("bc"))
        );
    }

    #[test]
    fn rendered_forms_never_contain_the_credential() {
        let key = CacheKey::for_credential(&secret("visible-token"));

        assert_eq!(key.to_hex().len(), 64);
        assert_eq!(key.to_string().len(), SHORT_LEN * 2);
        assert!(!format!("{key:?}").contains("visible-token"));
        assert!(key.to_hex().starts_with(&key.to_string()));
    }
}
