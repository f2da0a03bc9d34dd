//! Error types for the cache layer.

use thiserror::Error;

/// Failure of the cache store itself.
///
/// Never surfaced past the cache: lookups fall back to the computation.
#[derive(Debug, Clone, Error)]
pub enum CacheBackendError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Result error of a cached computation.
#[derive(Debug, Clone, Error)]
pub enum CacheError<E> {
    /// The computation itself failed. Never cached.
    #[error("{0}")]
    Compute(E),

    /// The task running the computation ended without producing a result.
    #[error("in-flight computation aborted before producing a result")]
    Aborted,
}
