//! Test helpers: token minting and scripted validation authorities.

#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use authn_gate_sdk::{AuthorityError, ValidationAuthorityClient};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header};
use parking_lot::Mutex;
use secrecy::SecretString;
use serde::Serialize;

const TEST_SIGNING_SECRET: &[u8] = b"gatekeeper-test-signing-secret";

/// Signs arbitrary claims into a compact HS256 token.
///
/// # Panics
///
/// If `claims` cannot be serialized.
#[must_use]
pub fn mint_claims<T: Serialize>(claims: &T) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SIGNING_SECRET),
    )
    .expect("test claims must serialize")
}

/// Mints a token for `subject` expiring at `expires_at`.
#[must_use]
pub fn mint_token(subject: &str, expires_at: DateTime<Utc>) -> String {
    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: i64,
    }

    mint_claims(&Claims {
        sub: subject,
        exp: expires_at.timestamp(),
    })
}

/// Mints a token for `subject` expiring `lifetime` from now.
#[must_use]
pub fn mint_token_valid_for(subject: &str, lifetime: Duration) -> String {
    let lifetime = TimeDelta::from_std(lifetime).expect("lifetime fits a TimeDelta");
    mint_token(subject, Utc::now() + lifetime)
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// What a [`ScriptedAuthority`] answers.
#[derive(Debug, Clone)]
pub enum AuthorityVerdict {
    Accept,
    Reject,
    Fail(AuthorityError),
}

/// Validation authority with a fixed answer, counting its calls.
pub struct ScriptedAuthority {
    verdict: Mutex<AuthorityVerdict>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedAuthority {
    #[must_use]
    pub fn new(verdict: AuthorityVerdict) -> Self {
        Self {
            verdict: Mutex::new(verdict),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn accepting() -> Self {
        Self::new(AuthorityVerdict::Accept)
    }

    #[must_use]
    pub fn rejecting() -> Self {
        Self::new(AuthorityVerdict::Reject)
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(AuthorityVerdict::Fail(AuthorityError::Unavailable(
            "connection refused".to_owned(),
        )))
    }

    /// Each call sleeps for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_verdict(&self, verdict: AuthorityVerdict) {
        *self.verdict.lock() = verdict;
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValidationAuthorityClient for ScriptedAuthority {
    async fn validate_credential(&self, _credential: &SecretString) -> Result<bool, AuthorityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let verdict = self.verdict.lock().clone();
        match verdict {
            AuthorityVerdict::Accept => Ok(true),
            AuthorityVerdict::Reject => Ok(false),
            AuthorityVerdict::Fail(e) => Err(e),
        }
    }
}
