//! Plugin API trait for permission sources.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::PermissionSourceError;

/// Resolves the capabilities granted to a caller.
///
/// Called only on a capability-cache miss.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Capabilities of `subject_id`, as `Module:Action` strings.
    ///
    /// `credential` is the raw bearer credential the subject authenticated
    /// with, for sources that resolve capabilities on the caller's behalf.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the source could not be reached
    /// - `Internal` for unexpected errors
    async fn resolve_capabilities(
        &self,
        subject_id: &str,
        credential: &SecretString,
    ) -> Result<Vec<String>, PermissionSourceError>;
}
