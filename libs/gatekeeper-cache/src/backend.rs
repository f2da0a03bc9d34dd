//! Cache backend contract.

use std::time::Duration;

use async_trait::async_trait;
use gatekeeper_security::CacheKey;

use crate::error::CacheBackendError;

/// Generic key/value store with absolute per-entry expiry.
///
/// Used identically for credential validity and capability sets. Any method
/// may fail; callers treat failures as a cache outage and bypass the cache.
#[async_trait]
pub trait CacheBackend<V>: Send + Sync
where
    V: Send + Sync + 'static,
{
    /// Returns the live entry for `key`, `None` when absent or expired.
    ///
    /// # Errors
    ///
    /// `CacheBackendError::Unavailable` if the store cannot be reached.
    async fn get(&self, key: &CacheKey) -> Result<Option<V>, CacheBackendError>;

    /// Stores `value` until `ttl` from now.
    ///
    /// # Errors
    ///
    /// `CacheBackendError::Unavailable` if the store cannot be reached.
    async fn set(&self, key: CacheKey, value: V, ttl: Duration) -> Result<(), CacheBackendError>;

    /// Removes the entry for `key` if present.
    ///
    /// # Errors
    ///
    /// `CacheBackendError::Unavailable` if the store cannot be reached.
    async fn remove(&self, key: &CacheKey) -> Result<(), CacheBackendError>;
}
