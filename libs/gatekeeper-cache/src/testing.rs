//! Backends for exercising cache degradation in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gatekeeper_security::CacheKey;
use parking_lot::Mutex;

use crate::backend::CacheBackend;
use crate::error::CacheBackendError;
use crate::memory::InMemoryCacheBackend;

/// Backend whose every operation fails, simulating a cache outage.
#[derive(Debug, Default)]
pub struct FailingCacheBackend {
    calls: AtomicUsize,
}

impl FailingCacheBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted against the backend.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> CacheBackendError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CacheBackendError::Unavailable("connection refused".to_owned())
    }
}

#[async_trait]
impl<V> CacheBackend<V> for FailingCacheBackend
where
    V: Send + Sync + 'static,
{
    async fn get(&self, _key: &CacheKey) -> Result<Option<V>, CacheBackendError> {
        Err(self.fail())
    }

    async fn set(&self, _key: CacheKey, _value: V, _ttl: Duration) -> Result<(), CacheBackendError> {
        Err(self.fail())
    }

    async fn remove(&self, _key: &CacheKey) -> Result<(), CacheBackendError> {
        Err(self.fail())
    }
}

/// In-memory backend that records every call.
pub struct RecordingCacheBackend<V> {
    inner: InMemoryCacheBackend<V>,
    gets: AtomicUsize,
    removes: AtomicUsize,
    sets: Mutex<Vec<(CacheKey, Duration)>>,
}

impl<V> Default for RecordingCacheBackend<V> {
    fn default() -> Self {
        Self {
            inner: InMemoryCacheBackend::new(),
            gets: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            sets: Mutex::new(Vec::new()),
        }
    }
}

impl<V> RecordingCacheBackend<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Every `(key, ttl)` passed to `set`, in call order.
    #[must_use]
    pub fn sets(&self) -> Vec<(CacheKey, Duration)> {
        self.sets.lock().clone()
    }

    /// TTL of the most recent `set`.
    #[must_use]
    pub fn last_ttl(&self) -> Option<Duration> {
        self.sets.lock().last().map(|(_, ttl)| *ttl)
    }
}

#[async_trait]
impl<V> CacheBackend<V> for RecordingCacheBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &CacheKey) -> Result<Option<V>, CacheBackendError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: CacheKey, value: V, ttl: Duration) -> Result<(), CacheBackendError> {
        self.sets.lock().push((key, ttl));
        self.inner.set(key, value, ttl).await
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), CacheBackendError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key).await
    }
}
