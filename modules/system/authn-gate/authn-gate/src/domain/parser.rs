//! Structural credential parsing.
//!
//! Runs before any cache lookup or authority call. Signatures are not
//! verified here; the validation authority is the integrity check.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use gatekeeper_security::Credential;
use serde::Deserialize;

use super::DomainError;

const BEARER_SCHEME: &str = "Bearer";

#[derive(Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Parses `Authorization` header values into [`Credential`]s.
#[derive(Debug, Clone, Default)]
pub struct CredentialParser {
    leeway: TimeDelta,
}

impl CredentialParser {
    /// `leeway` is the clock skew tolerated past a credential's `exp`.
    #[must_use]
    pub fn new(leeway: Duration) -> Self {
        Self {
            leeway: TimeDelta::from_std(leeway).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Extracts the bearer token from a header value.
    ///
    /// The scheme matches case-insensitively and the token is trimmed.
    ///
    /// # Errors
    ///
    /// `MissingCredential` if the header is absent, uses another scheme, or
    /// carries an empty token.
    pub fn extract_token(authorization: Option<&str>) -> Result<&str, DomainError> {
        let header = authorization.ok_or(DomainError::MissingCredential)?.trim();
        let (scheme, token) = header
            .split_once(char::is_whitespace)
            .ok_or(DomainError::MissingCredential)?;
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(DomainError::MissingCredential);
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::MissingCredential);
        }
        Ok(token)
    }

    /// Extracts and decodes the credential without looking at its expiry.
    ///
    /// # Errors
    ///
    /// - `MissingCredential` if there is no bearer token
    /// - `MalformedCredential` if the token is not a JWT-shaped compact
    ///   token with a non-empty `sub` and an integer `exp`
    pub fn decode(authorization: Option<&str>) -> Result<Credential, DomainError> {
        let token = Self::extract_token(authorization)?;
        let claims = decode_claims(token)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| DomainError::malformed("exp out of range"))?;
        Ok(Credential::new(token, claims.sub, expires_at))
    }

    /// Extracts, decodes and expiry-checks the credential.
    ///
    /// # Errors
    ///
    /// As [`Self::decode`], plus `ExpiredCredential` if `exp` is at or
    /// before `now` (less leeway).
    pub fn parse(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Credential, DomainError> {
        let credential = Self::decode(authorization)?;
        let expires_at = credential.expires_at();
        let cutoff = now.checked_sub_signed(self.leeway).unwrap_or(DateTime::<Utc>::MIN_UTC);
        if credential.is_expired_at(cutoff) {
            return Err(DomainError::ExpiredCredential {
                subject_id: credential.subject_id().to_owned(),
                expired_at: expires_at,
            });
        }
        Ok(credential)
    }
}

fn decode_claims(token: &str) -> Result<Claims, DomainError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, signature] = segments.as_slice() else {
        return Err(DomainError::malformed("expected three segments"));
    };
    if payload.is_empty() || signature.is_empty() {
        return Err(DomainError::malformed("empty segment"));
    }

    jsonwebtoken::decode_header(token)
        .map_err(|e| DomainError::malformed(format!("invalid header: {e}")))?;

    // decode errors would echo payload content, keep the reasons fixed
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| DomainError::malformed("payload is not base64url"))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|_| DomainError::malformed("payload lacks string sub or integer exp"))?;

    if claims.sub.trim().is_empty() {
        return Err(DomainError::malformed("empty subject"));
    }
    Ok(claims)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;
    use crate::testing::{mint_claims, mint_token};

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    fn assert_malformed(result: Result<Credential, DomainError>) {
        match result {
            Err(DomainError::MalformedCredential { .. }) => {}
            other => panic!("expected MalformedCredential, got {other:?}"),
        }
    }

    #[test]
    fn extracts_bearer_token_case_insensitively() {
        assert_eq!(
            CredentialParser::extract_token(Some("bearer   abc.def ")).unwrap(),
            "abc.def"
        );
        assert_eq!(
            CredentialParser::extract_token(Some("BEARER xyz")).unwrap(),
            "xyz"
        );
    }

    #[test]
    fn missing_or_foreign_scheme_is_missing_credential() {
        for header in [None, Some(""), Some("Bearer"), Some("Bearer   "), Some("Basic dXNlcjpwdw==")] {
            assert!(
                matches!(
                    CredentialParser::extract_token(header),
                    Err(DomainError::MissingCredential)
                ),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn parses_subject_and_expiry() {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(5);
        let token = mint_token("alice", exp);

        let credential = CredentialParser::default()
            .parse(Some(&bearer(&token)), now)
            .unwrap();

        assert_eq!(credential.subject_id(), "alice");
        assert_eq!(credential.expires_at().timestamp(), exp.timestamp());
        assert_eq!(credential.raw().expose_secret(), token);
    }

    #[test]
    fn expiry_at_now_is_expired() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = mint_token("alice", now);

        let result = CredentialParser::default().parse(Some(&bearer(&token)), now);

        assert!(matches!(result, Err(DomainError::ExpiredCredential { .. })));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = mint_token("alice", now - TimeDelta::seconds(5));
        let header = bearer(&token);

        assert!(CredentialParser::default().parse(Some(&header), now).is_err());
        assert!(
            CredentialParser::new(Duration::from_secs(10))
                .parse(Some(&header), now)
                .is_ok()
        );
    }

    #[test]
    fn rejects_tokens_without_three_segments() {
        let parser = CredentialParser::default();
        assert_malformed(parser.parse(Some("Bearer opaque-token"), Utc::now()));
        assert_malformed(parser.parse(Some("Bearer a.b"), Utc::now()));
        assert_malformed(parser.parse(Some("Bearer a.b.c.d"), Utc::now()));
    }

    #[test]
    fn rejects_undecodable_header() {
        let token = mint_token("alice", Utc::now() + TimeDelta::minutes(5));
        let (_, rest) = token.split_once('.').unwrap();
        let tampered = format!("not-a-header.{rest}");

        assert_malformed(CredentialParser::default().parse(Some(&bearer(&tampered)), Utc::now()));
    }

    #[test]
    fn rejects_payload_without_required_claims() {
        let parser = CredentialParser::default();
        let future = (Utc::now() + TimeDelta::minutes(5)).timestamp();

        for claims in [
            json!({ "exp": future }),
            json!({ "sub": "alice" }),
            json!({ "sub": "", "exp": future }),
            json!({ "sub": "alice", "exp": "tomorrow" }),
            json!({ "sub": 42, "exp": future }),
        ] {
            let token = mint_claims(&claims);
            assert_malformed(parser.parse(Some(&bearer(&token)), Utc::now()));
        }
    }

    #[test]
    fn malformed_reason_does_not_echo_payload() {
        let token = mint_claims(&json!({ "sub": "secret-subject", "exp": "soon" }));

        let err = CredentialParser::default()
            .parse(Some(&bearer(&token)), Utc::now())
            .unwrap_err();

        assert!(!err.to_string().contains("secret-subject"));
    }
}
