#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthZ` Gate SDK
//!
//! This crate provides the public API for the `authz_gate` module:
//!
//! - [`AuthZGateClient`] - Public API trait for consumers
//! - [`PermissionSource`] - Plugin API trait resolving a caller's capabilities
//! - [`Policy`], [`PermissionRequirement`], [`LogicalOperator`] - per-operation requirements
//! - [`CapabilitySet`] and [`evaluate`] - the pure permission check
//! - [`AuthZGateError`], [`PermissionSourceError`], [`PolicyError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use authz_gate_sdk::{AuthZGateClient, AuthZGateError};
//!
//! match authz.authorize(&identity, "orders.update").await {
//!     Ok(()) => { /* proceed */ }
//!     Err(AuthZGateError::InsufficientPermission) => { /* 403 */ }
//!     Err(e) => { /* 500 */ }
//! }
//! ```

pub mod api;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::AuthZGateClient;
pub use error::{AuthZGateError, PermissionSourceError, PolicyError};
pub use evaluator::evaluate;
pub use models::{CapabilitySet, LogicalOperator, PermissionRequirement, Policy};
pub use plugin_api::PermissionSource;
