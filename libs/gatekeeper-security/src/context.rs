use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

/// `Identity` is the authenticated caller of a single request.
///
/// Returned by the authentication gate and threaded explicitly into the
/// authorization gate and business logic. It is never persisted: the bearer
/// token is skipped on serialization and redacted in `Debug`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    /// Subject ID taken from the parsed credential. Empty for anonymous callers.
    subject_id: String,
    /// Expiry of the credential this identity was built from.
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    /// Original bearer token, needed for capability lookups.
    #[serde(skip)]
    bearer_token: Option<SecretString>,
}

impl Identity {
    #[must_use]
    pub fn builder() -> IdentityBuilder {
        IdentityBuilder::default()
    }

    /// Identity used for operations that allow anonymous access.
    #[must_use]
    pub fn anonymous() -> Self {
        IdentityBuilder::default().build()
    }

    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }

    /// True when no credential backs this identity.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.bearer_token.is_none()
    }

    /// Lifetime left on the backing credential, zero for anonymous identities.
    #[must_use]
    pub fn remaining_lifetime(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at
            .and_then(|exp| (exp - now).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }
}

#[derive(Default)]
pub struct IdentityBuilder {
    subject_id: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    bearer_token: Option<SecretString>,
}

impl IdentityBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    #[must_use]
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Identity {
        Identity {
            subject_id: self.subject_id.unwrap_or_default(),
            expires_at: self.expires_at,
            bearer_token: self.bearer_token,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_identity_builder_full() {
        let identity = Identity::builder()
            .subject_id("user-42")
            .expires_at(at(5_000))
            .bearer_token("test-token-123".to_owned())
            .build();

        assert_eq!(identity.subject_id(), "user-42");
        assert_eq!(identity.expires_at(), Some(at(5_000)));
        assert!(!identity.is_anonymous());
        assert_eq!(
            identity.bearer_token().map(ExposeSecret::expose_secret),
            Some("test-token-123"),
        );
    }

    #[test]
    fn test_identity_anonymous() {
        let identity = Identity::anonymous();

        assert_eq!(identity.subject_id(), "");
        assert!(identity.is_anonymous());
        assert!(identity.expires_at().is_none());
        assert_eq!(identity.remaining_lifetime(at(0)), Duration::ZERO);
    }

    #[test]
    fn test_identity_remaining_lifetime() {
        let identity = Identity::builder()
            .subject_id("user-42")
            .expires_at(at(100))
            .bearer_token("t".to_owned())
            .build();

        assert_eq!(identity.remaining_lifetime(at(90)), Duration::from_secs(10));
        assert_eq!(identity.remaining_lifetime(at(200)), Duration::ZERO);
    }

    #[test]
    fn test_identity_bearer_token_not_serialized() {
        let identity = Identity::builder()
            .subject_id("user-42")
            .bearer_token("secret-token".to_owned())
            .build();

        let serialized = serde_json::to_string(&identity).unwrap();
        assert!(!serialized.contains("secret-token"));

        let deserialized: Identity = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.subject_id(), "user-42");
        assert!(deserialized.bearer_token().is_none());
    }

    #[test]
    fn test_identity_debug_redacts_token() {
        let identity = Identity::builder()
            .bearer_token("secret-token".to_owned())
            .build();

        assert!(!format!("{identity:?}").contains("secret-token"));
    }
}
