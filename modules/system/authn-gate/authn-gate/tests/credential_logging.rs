#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Raw credentials must never reach log output.

use std::sync::Arc;
use std::time::Duration;

use authn_gate::testing::{ScriptedAuthority, bearer, mint_token, mint_token_valid_for};
use authn_gate::{AuthNGateConfig, init};
use authn_gate_sdk::{AuthNGateClient, AuthRequirement};
use chrono::{TimeDelta, Utc};
use gatekeeper_cache::InMemoryCacheBackend;
use gatekeeper_cache::testing::FailingCacheBackend;
use tracing_test::traced_test;

fn gate(authority: ScriptedAuthority) -> Arc<dyn AuthNGateClient> {
    init(
        &AuthNGateConfig::default(),
        Arc::new(authority),
        Arc::new(InMemoryCacheBackend::new()),
    )
}

#[tokio::test]
#[traced_test]
async fn accepted_credential_is_not_logged() {
    let token = mint_token_valid_for("alice", Duration::from_secs(600));
    let gate = gate(ScriptedAuthority::accepting());

    gate.authenticate(AuthRequirement::Required, Some(&bearer(&token)))
        .await
        .unwrap();
    gate.logout(Some(&bearer(&token))).await.unwrap();

    assert!(logs_contain("credential accepted"));
    assert!(logs_contain("credential logged out"));
    assert!(!logs_contain(&token));
}

#[tokio::test]
#[traced_test]
async fn rejected_credentials_are_not_logged() {
    let rejected = mint_token_valid_for("mallory", Duration::from_secs(600));
    let expired = mint_token("mallory", Utc::now() - TimeDelta::minutes(1));
    let gate = gate(ScriptedAuthority::rejecting());

    for token in [&rejected, &expired] {
        let result = gate
            .authenticate(AuthRequirement::Required, Some(&bearer(token)))
            .await;
        assert!(result.is_err());
    }

    assert!(logs_contain("authn_gate rejected request"));
    assert!(!logs_contain(&rejected));
    assert!(!logs_contain(&expired));
}

#[tokio::test]
#[traced_test]
async fn outages_do_not_log_credentials() {
    let token = mint_token_valid_for("alice", Duration::from_secs(600));
    let gate = init(
        &AuthNGateConfig::default(),
        Arc::new(ScriptedAuthority::unavailable()),
        Arc::new(FailingCacheBackend::new()),
    );

    let result = gate
        .authenticate(AuthRequirement::Required, Some(&bearer(&token)))
        .await;

    assert!(result.unwrap_err().is_unavailable());
    assert!(logs_contain("cache backend unavailable"));
    assert!(logs_contain("authn_gate call failed"));
    assert!(!logs_contain(&token));
}
