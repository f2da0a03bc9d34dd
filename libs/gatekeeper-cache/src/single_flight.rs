//! Single-flight cache-aside.
//!
//! Concurrent misses for the same key share one computation. The in-flight
//! registry is a `DashMap` whose shard lock is held only to find or register
//! an entry; waiters then await a `Shared` future without holding any lock.
//! The computation runs on its own task, so a cancelled caller never cancels
//! it for the remaining waiters.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use gatekeeper_security::CacheKey;
use tokio::sync::oneshot;

use crate::backend::CacheBackend;
use crate::error::CacheError;

type Outcome<V, E> = Result<V, CacheError<E>>;
type SharedOutcome<V, E> = Shared<BoxFuture<'static, Outcome<V, E>>>;

struct InFlight<V, E> {
    id: u64,
    outcome: SharedOutcome<V, E>,
}

type Registry<V, E> = DashMap<CacheKey, InFlight<V, E>>;

/// Removes the in-flight registration when the computation task ends,
/// including by panic.
struct Registration<V, E> {
    registry: Arc<Registry<V, E>>,
    key: CacheKey,
    id: u64,
}

impl<V, E> Registration<V, E> {
    fn is_current(&self) -> bool {
        self.registry
            .get(&self.key)
            .is_some_and(|entry| entry.id == self.id)
    }
}

impl<V, E> Drop for Registration<V, E> {
    fn drop(&mut self) {
        let id = self.id;
        self.registry.remove_if(&self.key, |_, entry| entry.id == id);
    }
}

/// Cache-aside with stampede protection.
///
/// For any set of concurrent callers presenting the same key while no entry
/// exists, the computation runs exactly once and every caller observes its
/// result.
pub struct SingleFlightCache<V, E> {
    name: &'static str,
    backend: Arc<dyn CacheBackend<V>>,
    in_flight: Arc<Registry<V, E>>,
    next_id: AtomicU64,
}

impl<V, E> SingleFlightCache<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// `name` labels log lines so the validity and capability caches can be told apart.
    pub fn new(name: &'static str, backend: Arc<dyn CacheBackend<V>>) -> Self {
        Self {
            name,
            backend,
            in_flight: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Number of computations currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns the cached value for `key`, computing it on a miss.
    ///
    /// `ttl_for` decides how long a successful result is stored; `None`
    /// skips storing it. Failed computations are never stored.
    ///
    /// If the backend cannot be read, `compute` runs directly and its
    /// result is returned uncached.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Compute`] with the computation's own error
    /// - [`CacheError::Aborted`] if the computation task panicked
    pub async fn get_or_compute<F, Fut, T>(
        &self,
        key: CacheKey,
        compute: F,
        ttl_for: T,
    ) -> Result<V, CacheError<E>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        T: FnOnce(&V) -> Option<Duration> + Send + 'static,
    {
        match self.backend.get(&key).await {
            Ok(Some(value)) => {
                tracing::trace!(cache = self.name, %key, "cache hit");
                return Ok(value);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    cache = self.name,
                    %key,
                    error = %e,
                    "cache backend unavailable, computing uncached"
                );
                return compute().await.map_err(CacheError::Compute);
            }
        }

        let mut started = None;
        let outcome = match self.in_flight.entry(key) {
            Entry::Occupied(entry) => {
                tracing::trace!(cache = self.name, %key, "joining in-flight computation");
                entry.get().outcome.clone()
            }
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let (tx, rx) = oneshot::channel::<Outcome<V, E>>();
                let outcome = rx
                    .map(|received| received.unwrap_or_else(|_| Err(CacheError::Aborted)))
                    .boxed()
                    .shared();
                entry.insert(InFlight {
                    id,
                    outcome: outcome.clone(),
                });
                started = Some((id, tx));
                outcome
            }
        };

        // spawn outside the shard lock
        if let Some((id, tx)) = started {
            tracing::debug!(cache = self.name, %key, "cache miss, starting computation");
            self.spawn_computation(key, id, tx, compute, ttl_for);
        }

        outcome.await
    }

    /// Drops the entry for `key` and detaches any in-flight computation,
    /// so the next caller computes afresh. A detached computation still
    /// answers the callers already waiting on it but does not store its result.
    pub async fn invalidate(&self, key: &CacheKey) {
        if self.in_flight.remove(key).is_some() {
            tracing::debug!(cache = self.name, %key, "detached in-flight computation");
        }
        match self.backend.remove(key).await {
            Ok(()) => tracing::debug!(cache = self.name, %key, "cache entry invalidated"),
            Err(e) => tracing::warn!(
                cache = self.name,
                %key,
                error = %e,
                "cache backend unavailable, entry left to expire"
            ),
        }
    }

    fn spawn_computation<F, Fut, T>(
        &self,
        key: CacheKey,
        id: u64,
        tx: oneshot::Sender<Outcome<V, E>>,
        compute: F,
        ttl_for: T,
    ) where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        T: FnOnce(&V) -> Option<Duration> + Send + 'static,
    {
        let name = self.name;
        let backend = Arc::clone(&self.backend);
        let registration = Registration {
            registry: Arc::clone(&self.in_flight),
            key,
            id,
        };

        tokio::spawn(async move {
            // a computation that finished between the caller's read and this
            // registration has already stored its result
            if let Ok(Some(value)) = backend.get(&key).await {
                tracing::trace!(cache = name, %key, "entry stored meanwhile, skipping computation");
                drop(registration);
                if tx.send(Ok(value)).is_err() {
                    tracing::trace!(cache = name, %key, "no callers left waiting");
                }
                return;
            }

            let outcome = compute().await.map_err(CacheError::Compute);

            if let Ok(value) = &outcome {
                match ttl_for(value) {
                    Some(ttl) if registration.is_current() => {
                        if let Err(e) = backend.set(key, value.clone(), ttl).await {
                            tracing::warn!(
                                cache = name,
                                %key,
                                error = %e,
                                "cache backend unavailable, result not stored"
                            );
                        }
                    }
                    Some(_) => {
                        tracing::debug!(cache = name, %key, "computation was invalidated, result not stored");
                    }
                    None => tracing::trace!(cache = name, %key, "result not cacheable"),
                }
            }

            // deregister before answering so late arrivals read the stored entry
            drop(registration);
            if tx.send(outcome).is_err() {
                tracing::trace!(cache = name, %key, "no callers left waiting");
            }
        });
    }
}
