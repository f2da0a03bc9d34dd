use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::context::Identity;

/// A bearer credential that passed structural parsing.
///
/// `subject_id` and `expires_at` come from the parsed token, never from
/// anything else the client sent. The raw value stays wrapped in
/// `SecretString` so `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct Credential {
    raw: SecretString,
    subject_id: String,
    expires_at: DateTime<Utc>,
}

impl Credential {
    #[must_use]
    pub fn new(
        raw: impl Into<String>,
        subject_id: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            raw: SecretString::from(raw.into()),
            subject_id: subject_id.into(),
            expires_at,
        }
    }

    /// The raw credential. Only hash it or forward it to an authority.
    #[must_use]
    pub fn raw(&self) -> &SecretString {
        &self.raw
    }

    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A credential expiring exactly at `now` is already expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Time left until expiry, saturating at zero.
    #[must_use]
    pub fn remaining_lifetime(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Turn the validated credential into the request's identity.
    #[must_use]
    pub fn into_identity(self) -> Identity {
        Identity::builder()
            .subject_id(self.subject_id)
            .expires_at(self.expires_at)
            .bearer_token(self.raw)
            .build()
    }
}
