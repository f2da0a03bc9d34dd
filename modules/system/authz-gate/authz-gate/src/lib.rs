//! `AuthZ` Gate Module
//!
//! Checks an authenticated [`Identity`](gatekeeper_security::Identity)
//! against the permission policy registered for the requested operation.
//! Capability sets come from a `PermissionSource` through a
//! stampede-protected cache.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::{AuthZGateConfig, PolicyConfig};
pub use domain::PolicyRegistry;
pub use module::init;
