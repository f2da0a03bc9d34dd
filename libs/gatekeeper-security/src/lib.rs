#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives shared by the gatekeeper gates.
//!
//! - [`Credential`] - a structurally parsed bearer credential
//! - [`Identity`] - the authenticated caller, scoped to one request
//! - [`CacheKey`] - irreversible digest used to key every credential-derived cache entry

pub mod cache_key;
pub mod context;
pub mod credential;

pub use cache_key::CacheKey;
pub use context::{Identity, IdentityBuilder};
pub use credential::Credential;
