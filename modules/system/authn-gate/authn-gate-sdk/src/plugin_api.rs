//! Plugin API trait for validation authorities.
//!
//! The authority is the external collaborator that confirms a structurally
//! valid credential is still live (not revoked). The gate calls it only on a
//! cache miss.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::AuthorityError;

/// Plugin API trait for validation authority implementations.
#[async_trait]
pub trait ValidationAuthorityClient: Send + Sync {
    /// Report whether `credential` is still live.
    ///
    /// `Ok(false)` means the authority rejects it. Transport failures must be
    /// reported as errors, never as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Timeout` if the authority could not answer
    /// - `Internal` for unexpected errors
    async fn validate_credential(&self, credential: &SecretString) -> Result<bool, AuthorityError>;
}
