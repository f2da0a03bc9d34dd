//! Credential-validity cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use gatekeeper_security::CacheKey;
use tokio::time::Instant;

use crate::backend::CacheBackend;
use crate::config::CacheTtlPolicy;
use crate::error::CacheError;
use crate::single_flight::SingleFlightCache;

/// Maps a credential digest to a validity verdict.
///
/// A valid verdict is stored for the credential's remaining lifetime (skipped
/// below the floor); an invalid one for the fixed negative window.
pub struct ValidationCache<E> {
    inner: SingleFlightCache<bool, E>,
    ttl: CacheTtlPolicy,
}

impl<E> ValidationCache<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new(backend: Arc<dyn CacheBackend<bool>>, ttl: CacheTtlPolicy) -> Self {
        Self {
            inner: SingleFlightCache::new("credential-validity", backend),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl_policy(&self) -> CacheTtlPolicy {
        self.ttl
    }

    /// Returns the cached verdict for `key`, running `validate` on a miss.
    ///
    /// `remaining_lifetime` is measured now; time spent validating is
    /// deducted before a valid verdict is stored.
    ///
    /// # Errors
    ///
    /// Propagates the validator's error as [`CacheError::Compute`]; it is
    /// never turned into an "invalid" verdict.
    pub async fn get_or_validate<F, Fut>(
        &self,
        key: CacheKey,
        validate: F,
        remaining_lifetime: Duration,
    ) -> Result<bool, CacheError<E>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool, E>> + Send + 'static,
    {
        let policy = self.ttl;
        let started = Instant::now();
        self.inner
            .get_or_compute(key, validate, move |valid| {
                policy.validity_ttl(*valid, remaining_lifetime.saturating_sub(started.elapsed()))
            })
            .await
    }

    /// Removes the verdict for `key` immediately (logout).
    pub async fn invalidate(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight()
    }
}
