//! Process-local cache backend.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use gatekeeper_security::CacheKey;
use tokio::time::Instant;

use crate::backend::CacheBackend;
use crate::error::CacheBackendError;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// In-memory backend with absolute per-entry expiry.
///
/// Expired entries are dropped lazily on read; call
/// [`InMemoryCacheBackend::purge_expired`] periodically to reclaim the rest.
pub struct InMemoryCacheBackend<V> {
    entries: DashMap<CacheKey, Entry<V>>,
}

impl<V> Default for InMemoryCacheBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> InMemoryCacheBackend<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl<V> CacheBackend<V> for InMemoryCacheBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &CacheKey) -> Result<Option<V>, CacheBackendError> {
        let now = Instant::now();
        let lookup = self
            .entries
            .get(key)
            .map(|entry| (entry.expires_at > now).then(|| entry.value.clone()));

        match lookup {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => {
                self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: CacheKey, value: V, ttl: Duration) -> Result<(), CacheBackendError> {
        let Some(expires_at) = Instant::now().checked_add(ttl) else {
            tracing::debug!(%key, "ttl out of range, entry not stored");
            return Ok(());
        };
        self.entries.insert(key, Entry { value, expires_at });
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), CacheBackendError> {
        self.entries.remove(key);
        Ok(())
    }
}
