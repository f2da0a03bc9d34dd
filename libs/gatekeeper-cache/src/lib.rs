#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Stampede-protected cache-aside used by both gates.
//!
//! - [`CacheBackend`] - key/value store contract with per-entry expiry
//! - [`InMemoryCacheBackend`] - process-local backend
//! - [`SingleFlightCache`] - collapses concurrent misses into one computation
//! - [`ValidationCache`] - credential-validity cache with expiry tied to the credential
//!
//! ## Degradation
//!
//! A failing backend never fails a lookup: the computation runs uncached
//! (fail-open). A failing computation is never cached and its error reaches
//! every waiter unchanged, so callers decide how to fail closed.

pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod single_flight;
pub mod validation;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use backend::CacheBackend;
pub use config::{CacheTtlConfig, CacheTtlPolicy};
pub use error::{CacheBackendError, CacheError};
pub use memory::InMemoryCacheBackend;
pub use single_flight::SingleFlightCache;
pub use validation::ValidationCache;
