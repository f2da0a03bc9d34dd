use std::collections::HashMap;
use std::sync::Arc;

use authn_gate_sdk::{AuthNGateClient, AuthRequirement};
use authz_gate_sdk::AuthZGateClient;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, Method, header};

use crate::config::ApiGatewayConfig;
use crate::error::GatewayError;
use crate::operation::OperationSpec;

#[derive(Debug, Clone)]
struct RouteEntry {
    requirement: Option<AuthRequirement>,
    operation_id: String,
}

/// What the gates need to know about a request's route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDecision<'a> {
    pub requirement: AuthRequirement,
    /// `None` for routes not registered with the gateway.
    pub operation_id: Option<&'a str>,
}

/// Gateway-specific route policy: per-method matchers from path pattern to
/// auth requirement and operation id.
#[derive(Clone)]
pub struct GatewayRoutePolicy {
    matchers: Arc<HashMap<Method, matchit::Router<RouteEntry>>>,
    require_auth_by_default: bool,
}

impl GatewayRoutePolicy {
    /// Builds matchers from the registered operations.
    ///
    /// # Errors
    ///
    /// Fails if two operations register conflicting patterns for one method.
    pub fn from_operations(
        cfg: &ApiGatewayConfig,
        operations: &[OperationSpec],
    ) -> anyhow::Result<Self> {
        let mut matchers: HashMap<Method, matchit::Router<RouteEntry>> = HashMap::new();

        for spec in operations {
            let entry = RouteEntry {
                requirement: spec.auth(),
                operation_id: spec.operation_id().to_owned(),
            };
            matchers
                .entry(spec.method().clone())
                .or_default()
                .insert(spec.path(), entry)
                .map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to insert route pattern '{} {}': {e}",
                        spec.method(),
                        spec.path()
                    )
                })?;
        }

        Ok(Self {
            matchers: Arc::new(matchers),
            require_auth_by_default: cfg.require_auth_by_default,
        })
    }

    /// Resolve the auth requirement and operation for a given (method, path).
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> RouteDecision<'_> {
        let default = if self.require_auth_by_default {
            AuthRequirement::Required
        } else {
            AuthRequirement::None
        };

        match self.matchers.get(method).and_then(|m| m.at(path).ok()) {
            Some(matched) => RouteDecision {
                requirement: matched.value.requirement.unwrap_or(default),
                operation_id: Some(matched.value.operation_id.as_str()),
            },
            None => RouteDecision {
                requirement: default,
                operation_id: None,
            },
        }
    }
}

/// Shared state for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub authn: Arc<dyn AuthNGateClient>,
    pub authz: Arc<dyn AuthZGateClient>,
    pub route_policy: GatewayRoutePolicy,
}

/// Runs both gates in order.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Resolves the route via `GatewayRoutePolicy`
/// 3. `AuthN` gate: anonymous identity for public routes, else a validated one
/// 4. `AuthZ` gate against the operation's policy
/// 5. Inserts the `Identity` into request extensions
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let decision = state.route_policy.resolve(req.method(), req.uri().path());

    let identity = match state
        .authn
        .authenticate(decision.requirement, authorization(req.headers()))
        .await
    {
        Ok(identity) => identity,
        Err(e) => return GatewayError::from(e).into_response(),
    };

    if let Some(operation) = decision.operation_id
        && let Err(e) = state.authz.authorize(&identity, operation).await
    {
        return GatewayError::from(e).into_response();
    }

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Raw `Authorization` header value, `None` if absent or not visible ASCII.
#[must_use]
pub fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn policy(operations: &[OperationSpec], require_auth_by_default: bool) -> GatewayRoutePolicy {
        let cfg = ApiGatewayConfig {
            require_auth_by_default,
            ..ApiGatewayConfig::default()
        };
        GatewayRoutePolicy::from_operations(&cfg, operations).unwrap()
    }

    #[test]
    fn explicit_public_route_with_path_params_returns_none() {
        let policy = policy(&[OperationSpec::get("/users/{id}", "users.get").public()], true);

        let decision = policy.resolve(&Method::GET, "/users/42");

        assert_eq!(decision.requirement, AuthRequirement::None);
        assert_eq!(decision.operation_id, Some("users.get"));
    }

    #[test]
    fn explicit_authenticated_route_returns_required() {
        let policy = policy(
            &[OperationSpec::get("/admin/metrics", "admin.metrics").authenticated()],
            false,
        );

        let decision = policy.resolve(&Method::GET, "/admin/metrics");

        assert_eq!(decision.requirement, AuthRequirement::Required);
    }

    #[test]
    fn route_without_requirement_follows_default() {
        let ops = [OperationSpec::get("/profile", "profile.get")];

        assert_eq!(
            policy(&ops, true).resolve(&Method::GET, "/profile").requirement,
            AuthRequirement::Required
        );
        assert_eq!(
            policy(&ops, false).resolve(&Method::GET, "/profile").requirement,
            AuthRequirement::None
        );
    }

    #[test]
    fn unknown_route_has_no_operation() {
        let policy = policy(&[], true);

        let decision = policy.resolve(&Method::POST, "/unknown");

        assert_eq!(decision.requirement, AuthRequirement::Required);
        assert_eq!(decision.operation_id, None);
    }

    #[test]
    fn different_methods_resolve_independently() {
        let policy = policy(
            &[
                OperationSpec::get("/orders", "orders.list").public(),
                OperationSpec::post("/orders", "orders.create"),
            ],
            true,
        );

        let get = policy.resolve(&Method::GET, "/orders");
        let post = policy.resolve(&Method::POST, "/orders");

        assert_eq!(get.requirement, AuthRequirement::None);
        assert_eq!(get.operation_id, Some("orders.list"));
        assert_eq!(post.requirement, AuthRequirement::Required);
        assert_eq!(post.operation_id, Some("orders.create"));
    }

    #[test]
    fn conflicting_patterns_are_rejected() {
        let cfg = ApiGatewayConfig::default();
        let result = GatewayRoutePolicy::from_operations(
            &cfg,
            &[
                OperationSpec::get("/orders/{id}", "orders.get"),
                OperationSpec::get("/orders/{order_id}", "orders.get2"),
            ],
        );

        assert!(result.is_err());
    }

    #[test]
    fn preflight_requires_origin_and_request_method() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, "https://example.test".parse().unwrap());
        assert!(!is_preflight_request(&Method::OPTIONS, &headers));

        headers.insert(header::ACCESS_CONTROL_REQUEST_METHOD, "GET".parse().unwrap());
        assert!(is_preflight_request(&Method::OPTIONS, &headers));
        assert!(!is_preflight_request(&Method::GET, &headers));
    }
}
