#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Behavior of the `AuthZ` gate through its public client.

use std::sync::Arc;
use std::time::Duration;

use authz_gate::testing::ScriptedPermissionSource;
use authz_gate::{AuthZGateConfig, PolicyConfig, PolicyRegistry, init};
use authz_gate_sdk::{
    AuthZGateClient, AuthZGateError, CapabilitySet, LogicalOperator, PermissionSourceError, Policy,
};
use chrono::{TimeDelta, Utc};
use futures::future::join_all;
use gatekeeper_cache::testing::RecordingCacheBackend;
use gatekeeper_cache::{CacheBackend, InMemoryCacheBackend};
use gatekeeper_security::Identity;
use tracing_test::traced_test;

fn identity(subject: &str, token: &str, lifetime: TimeDelta) -> Identity {
    Identity::builder()
        .subject_id(subject)
        .expires_at(Utc::now() + lifetime)
        .bearer_token(token.to_owned())
        .build()
}

fn alice() -> Identity {
    identity("alice", "alice-token", TimeDelta::hours(1))
}

fn config(enabled: bool) -> AuthZGateConfig {
    let mut cfg = AuthZGateConfig {
        enabled,
        ..AuthZGateConfig::default()
    };
    cfg.policies.insert(
        "orders.list".to_owned(),
        PolicyConfig {
            operator: LogicalOperator::Or,
            permissions: vec!["Customer:View".to_owned(), "Order:View".to_owned()],
        },
    );
    cfg.policies.insert(
        "products.update".to_owned(),
        PolicyConfig {
            operator: LogicalOperator::And,
            permissions: vec!["Product:Update".to_owned(), "Stock:Update".to_owned()],
        },
    );
    cfg
}

fn gate_with(
    enabled: bool,
    source: &Arc<ScriptedPermissionSource>,
    backend: Arc<dyn CacheBackend<Arc<CapabilitySet>>>,
) -> Arc<dyn AuthZGateClient> {
    init(&config(enabled), source.clone(), backend).unwrap()
}

fn gate(source: &Arc<ScriptedPermissionSource>) -> Arc<dyn AuthZGateClient> {
    gate_with(true, source, Arc::new(InMemoryCacheBackend::new()))
}

#[tokio::test]
async fn or_policy_passes_with_one_capability() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Order:View"]));

    gate(&source).authorize(&alice(), "orders.list").await.unwrap();
}

#[tokio::test]
async fn and_policy_denies_partial_capabilities() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Product:Update"]));

    let result = gate(&source).authorize(&alice(), "products.update").await;

    assert_eq!(result.unwrap_err(), AuthZGateError::InsufficientPermission);
}

#[tokio::test]
async fn and_policy_passes_with_all_capabilities() {
    let source = Arc::new(
        ScriptedPermissionSource::new().with_grant("alice", &["Product:Update", "Stock:Update"]),
    );

    gate(&source)
        .authorize(&alice(), "products.update")
        .await
        .unwrap();
}

#[tokio::test]
async fn unprotected_operations_skip_the_permission_source() {
    let source = Arc::new(ScriptedPermissionSource::new());

    gate(&source).authorize(&alice(), "health").await.unwrap();
    gate(&source)
        .authorize(&Identity::anonymous(), "health")
        .await
        .unwrap();

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn anonymous_caller_is_denied_on_protected_operation() {
    let source = Arc::new(ScriptedPermissionSource::new());

    let result = gate(&source)
        .authorize(&Identity::anonymous(), "orders.list")
        .await;

    assert_eq!(result.unwrap_err(), AuthZGateError::InsufficientPermission);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
#[traced_test]
async fn kill_switch_allows_everything_without_consulting_source() {
    let source = Arc::new(ScriptedPermissionSource::new());
    let gate = gate_with(false, &source, Arc::new(InMemoryCacheBackend::new()));

    gate.authorize(&alice(), "products.update").await.unwrap();
    gate.authorize(&Identity::anonymous(), "orders.list")
        .await
        .unwrap();

    assert_eq!(source.calls(), 0);
    assert!(logs_contain("Authorization is DISABLED"));
}

#[tokio::test]
async fn capabilities_are_cached_per_credential() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Order:View"]));
    let gate = gate(&source);

    for _ in 0..3 {
        gate.authorize(&alice(), "orders.list").await.unwrap();
    }
    assert!(gate.authorize(&alice(), "products.update").await.is_err());
    assert_eq!(source.calls(), 1);

    let other_token = identity("alice", "alice-second-token", TimeDelta::hours(1));
    gate.authorize(&other_token, "orders.list").await.unwrap();
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn concurrent_checks_share_one_resolution() {
    let source = Arc::new(
        ScriptedPermissionSource::new()
            .with_grant("alice", &["Order:View"])
            .with_delay(Duration::from_millis(50)),
    );
    let gate = gate(&source);
    let alice = alice();

    let results = join_all((0..16).map(|_| gate.authorize(&alice, "orders.list"))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn source_outage_fails_closed_and_is_not_cached() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Order:View"]));
    source.set_failure(Some(PermissionSourceError::Unavailable(
        "connection refused".to_owned(),
    )));
    let gate = gate(&source);

    let denied = gate.authorize(&alice(), "orders.list").await;
    assert!(matches!(
        denied.unwrap_err(),
        AuthZGateError::PermissionSourceUnavailable(_)
    ));

    source.set_failure(None);
    gate.authorize(&alice(), "orders.list").await.unwrap();
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn invalidate_picks_up_revoked_capabilities() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Order:View"]));
    let gate = gate(&source);

    gate.authorize(&alice(), "orders.list").await.unwrap();
    source.grant("alice", &[]);
    gate.authorize(&alice(), "orders.list").await.unwrap();

    gate.invalidate(&alice()).await;
    let result = gate.authorize(&alice(), "orders.list").await;

    assert_eq!(result.unwrap_err(), AuthZGateError::InsufficientPermission);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn capability_ttl_follows_credential_lifetime() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Order:View"]));
    let backend = Arc::new(RecordingCacheBackend::<Arc<CapabilitySet>>::new());
    let gate = gate_with(true, &source, backend.clone());

    gate.authorize(&identity("alice", "ten-seconds", TimeDelta::seconds(10)), "orders.list")
        .await
        .unwrap();

    let ttl = backend.last_ttl().unwrap();
    assert!(ttl <= Duration::from_secs(10));
    assert!(ttl >= Duration::from_secs(8));
}

#[tokio::test(start_paused = true)]
async fn slow_resolution_shortens_the_capability_ttl() {
    let source = Arc::new(
        ScriptedPermissionSource::new()
            .with_grant("alice", &["Order:View"])
            .with_delay(Duration::from_secs(4)),
    );
    let backend = Arc::new(RecordingCacheBackend::<Arc<CapabilitySet>>::new());
    let gate = gate_with(true, &source, backend.clone());

    gate.authorize(&identity("alice", "ten-seconds", TimeDelta::seconds(10)), "orders.list")
        .await
        .unwrap();

    let ttl = backend.last_ttl().unwrap();
    assert!(ttl <= Duration::from_secs(6));
    assert!(ttl >= Duration::from_secs(5));
}

#[tokio::test]
async fn nearly_expired_credentials_are_not_cached() {
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Order:View"]));
    let backend = Arc::new(RecordingCacheBackend::<Arc<CapabilitySet>>::new());
    let gate = gate_with(true, &source, backend.clone());
    let expiring = identity("alice", "expiring", TimeDelta::milliseconds(500));

    gate.authorize(&expiring, "orders.list").await.unwrap();
    gate.authorize(&expiring, "orders.list").await.unwrap();

    assert!(backend.sets().is_empty());
    assert_eq!(source.calls(), 2);
}

#[test]
fn init_rejects_invalid_policies() {
    let mut cfg = AuthZGateConfig::default();
    cfg.policies.insert(
        "orders.list".to_owned(),
        PolicyConfig {
            operator: LogicalOperator::Or,
            permissions: vec!["not a permission".to_owned()],
        },
    );

    let result = init(
        &cfg,
        Arc::new(ScriptedPermissionSource::new()),
        Arc::new(InMemoryCacheBackend::new()),
    );

    let err = result.err().unwrap();
    assert!(format!("{err:#}").contains("orders.list"));
}

#[tokio::test]
async fn registry_built_in_code_is_honoured() {
    let registry = PolicyRegistry::new()
        .with("stock.adjust", Policy::all_of(["Stock:Update"]).unwrap())
        .unwrap();
    let source = Arc::new(ScriptedPermissionSource::new().with_grant("alice", &["Stock:View"]));
    let gate = authz_gate::module::init_with_registry(
        &AuthZGateConfig::default(),
        registry,
        source.clone(),
        Arc::new(InMemoryCacheBackend::new()),
    );

    let result = gate.authorize(&alice(), "stock.adjust").await;

    assert_eq!(result.unwrap_err(), AuthZGateError::InsufficientPermission);
}
