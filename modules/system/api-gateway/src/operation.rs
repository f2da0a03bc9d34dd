//! Route registration descriptors.

use authn_gate_sdk::AuthRequirement;
use http::Method;

/// One HTTP operation: where it lives, what it is called for permission
/// checks, and whether it needs a caller.
///
/// Paths use axum/matchit `{param}` syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    method: Method,
    path: String,
    operation_id: String,
    auth: Option<AuthRequirement>,
}

impl OperationSpec {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            operation_id: operation_id.into(),
            auth: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(Method::GET, path, operation_id)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(Method::POST, path, operation_id)
    }

    #[must_use]
    pub fn put(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(Method::PUT, path, operation_id)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, operation_id)
    }

    /// Anonymous callers allowed; the credential is not inspected.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.auth = Some(AuthRequirement::None);
        self
    }

    /// Authentication required even when not required by default.
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.auth = Some(AuthRequirement::Required);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// `None` defers to `require_auth_by_default`.
    #[must_use]
    pub fn auth(&self) -> Option<AuthRequirement> {
        self.auth
    }
}
