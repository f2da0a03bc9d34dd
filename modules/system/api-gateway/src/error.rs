//! Error response shaping.
//!
//! Clients get a generic body per status; the specific cause is logged with
//! the same `errorId` that the body carries.

use authn_gate_sdk::AuthNGateError;
use authz_gate_sdk::AuthZGateError;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub succeeded: bool,
    pub data: Option<serde_json::Value>,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_id: Uuid,
    pub status_code: u16,
    pub message: String,
}

impl ErrorResponse {
    /// Generic body for `status`, tagged with `error_id`.
    #[must_use]
    pub fn generic(status: StatusCode, error_id: Uuid) -> Self {
        let message = public_message(status).to_owned();
        Self {
            succeeded: false,
            data: None,
            message: message.clone(),
            errors: vec![ErrorDetail {
                error_id,
                status_code: status.as_u16(),
                message,
            }],
        }
    }
}

fn public_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => "Authentication required",
        StatusCode::FORBIDDEN => "Access denied",
        _ => "Internal server error",
    }
}

/// A request rejected by one of the gates.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthNGateError),

    #[error("authorization failed: {0}")]
    Authorization(#[from] AuthZGateError),
}

impl GatewayError {
    /// Upstream outages are 500: the request is rejected, never trusted.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Authentication(AuthNGateError::AuthorityUnavailable(_))
            | Self::Authorization(AuthZGateError::PermissionSourceUnavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(AuthZGateError::InsufficientPermission) => StatusCode::FORBIDDEN,
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(e) => e.kind(),
            Self::Authorization(AuthZGateError::InsufficientPermission) => {
                "insufficient_permission"
            }
            Self::Authorization(AuthZGateError::PermissionSourceUnavailable(_)) => {
                "permission_source_unavailable"
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_id = Uuid::new_v4();

        if status.is_server_error() {
            tracing::error!(%error_id, kind = self.kind(), error = %self, "request rejected");
        } else {
            tracing::warn!(%error_id, kind = self.kind(), error = %self, "request rejected");
        }

        let mut response = (status, Json(ErrorResponse::generic(status, error_id))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
