//! Gateway assembly: operation registration, middleware stack, server loop.

use std::collections::HashSet;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use authn_gate_sdk::AuthNGateClient;
use authz_gate_sdk::AuthZGateClient;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, post};
use http::{HeaderName, Method};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::auth::{AuthState, GatewayRoutePolicy, auth_middleware};
use crate::config::ApiGatewayConfig;
use crate::handlers::{self, LOGOUT_PATH, LogoutState};
use crate::operation::OperationSpec;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Main API Gateway: owns the HTTP router and the list of registered
/// operations the route policy is built from.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    authn: Arc<dyn AuthNGateClient>,
    authz: Arc<dyn AuthZGateClient>,
    router: Router,
    operations: Vec<OperationSpec>,
    routes: HashSet<(Method, String)>,
}

impl ApiGateway {
    /// Creates the gateway with its own logout endpoint.
    #[must_use]
    pub fn new(
        config: ApiGatewayConfig,
        authn: Arc<dyn AuthNGateClient>,
        authz: Arc<dyn AuthZGateClient>,
    ) -> Self {
        let logout_state = LogoutState {
            authn: Arc::clone(&authn),
            authz: Arc::clone(&authz),
        };
        let mut gateway = Self {
            config,
            authn,
            authz,
            router: Router::new(),
            operations: Vec::new(),
            routes: HashSet::new(),
        };
        gateway.push(
            OperationSpec::post(LOGOUT_PATH, "auth.logout").public(),
            post(handlers::logout).with_state(logout_state),
        );
        gateway
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Registers an operation and its handler.
    ///
    /// # Errors
    ///
    /// Fails if the method and path are already registered.
    pub fn operation(mut self, spec: OperationSpec, handler: MethodRouter) -> Result<Self> {
        if self.routes.contains(&(spec.method().clone(), spec.path().to_owned())) {
            anyhow::bail!(
                "duplicate route registration: {} {}",
                spec.method(),
                spec.path()
            );
        }
        self.push(spec, handler);
        Ok(self)
    }

    fn push(&mut self, spec: OperationSpec, handler: MethodRouter) {
        tracing::debug!(
            method = %spec.method(),
            path = spec.path(),
            operation_id = spec.operation_id(),
            auth = ?spec.auth(),
            "registered operation"
        );
        let router = std::mem::take(&mut self.router);
        self.router = router.route(spec.path(), handler);
        self.routes
            .insert((spec.method().clone(), spec.path().to_owned()));
        self.operations.push(spec);
    }

    /// Applies the middleware stack and returns the finished router.
    ///
    /// # Errors
    ///
    /// Fails if the route policy cannot be built.
    pub fn build_router(self) -> Result<Router> {
        let route_policy = GatewayRoutePolicy::from_operations(&self.config, &self.operations)?;

        // `Router::layer` wraps: the last layer added runs first.
        // Request order: SetRequestId -> PropagateRequestId -> Trace -> Auth -> Router
        let auth_state = AuthState {
            authn: self.authn,
            authz: self.authz,
            route_policy,
        };
        let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        let router = self
            .router
            .layer(from_fn_with_state(auth_state, auth_middleware))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                        let rid = req
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("n/a");
                        tracing::info_span!(
                            "http_request",
                            method = %req.method(),
                            uri = %req.uri().path(),
                            request_id = %rid,
                            status = Empty,
                            latency_ms = Empty,
                        )
                    })
                    .on_response(
                        |res: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         span: &tracing::Span| {
                            span.record("status", res.status().as_u16());
                            span.record("latency_ms", latency.as_millis());
                        },
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

        Ok(router)
    }

    /// Binds `bind_addr` and serves until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Fails on an invalid bind address, bind failure, or server error.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = parse_bind_address(&self.config.bind_addr)?;
        let router = self.build_router()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "HTTP server bound");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
    bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
}
