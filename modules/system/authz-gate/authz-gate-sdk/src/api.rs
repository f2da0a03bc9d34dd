//! Public API trait for the `AuthZ` gate.

use async_trait::async_trait;
use gatekeeper_security::Identity;

use crate::error::AuthZGateError;

/// Public API trait for the `AuthZ` gate.
#[async_trait]
pub trait AuthZGateClient: Send + Sync {
    /// Check that `identity` may perform `operation`.
    ///
    /// Operations with no registered policy are not permission-protected.
    ///
    /// # Errors
    ///
    /// - `InsufficientPermission` if the caller's capabilities fail the policy
    /// - `PermissionSourceUnavailable` if capabilities could not be resolved
    async fn authorize(&self, identity: &Identity, operation: &str) -> Result<(), AuthZGateError>;

    /// Drop any cached capabilities for `identity` (logout).
    async fn invalidate(&self, identity: &Identity);
}
