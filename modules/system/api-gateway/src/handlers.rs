//! Endpoints owned by the gateway itself.

use std::sync::Arc;

use authn_gate_sdk::AuthNGateClient;
use authz_gate_sdk::AuthZGateClient;
use axum::extract::State;
use http::{HeaderMap, StatusCode};

use crate::auth::authorization;
use crate::error::GatewayError;

pub const LOGOUT_PATH: &str = "/auth/v1/logout";

/// Clients the logout endpoint needs.
#[derive(Clone)]
pub struct LogoutState {
    pub authn: Arc<dyn AuthNGateClient>,
    pub authz: Arc<dyn AuthZGateClient>,
}

/// Forgets the cached validity verdict and capabilities of the presented
/// credential. Public so expired or revoked credentials can be logged out.
///
/// # Errors
///
/// `Authentication` if the request carries no decodable bearer credential.
pub async fn logout(
    State(state): State<LogoutState>,
    headers: HeaderMap,
) -> Result<StatusCode, GatewayError> {
    let identity = state.authn.logout(authorization(&headers)).await?;
    state.authz.invalidate(&identity).await;
    tracing::info!(subject_id = identity.subject_id(), "logged out");
    Ok(StatusCode::NO_CONTENT)
}
