//! `AuthN` Gate Module
//!
//! Turns the raw `Authorization` header of a request into an authenticated
//! [`Identity`](gatekeeper_security::Identity):
//!
//! 1. structural parse and expiry check, with no I/O
//! 2. cached validity lookup, collapsing concurrent misses
//! 3. one call to the validation authority on a miss
//!
//! Provides the `AuthNGateClient` trait implementation consumed by the
//! API gateway.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::AuthNGateConfig;
pub use module::init;
