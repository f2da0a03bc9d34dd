#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthN` Gate SDK
//!
//! This crate provides the public API for the `authn_gate` module:
//!
//! - [`AuthNGateClient`] - Public API trait for consumers
//! - [`ValidationAuthorityClient`] - Plugin API trait for validation authorities
//! - [`AuthRequirement`] - Per-operation authentication requirement
//! - [`AuthNGateError`], [`AuthorityError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_gate_sdk::{AuthNGateClient, AuthRequirement};
//!
//! let identity = authn
//!     .authenticate(AuthRequirement::Required, Some("Bearer eyJ..."))
//!     .await?;
//! // thread `identity` into the authorization gate and handlers
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::AuthNGateClient;
pub use error::{AuthNGateError, AuthorityError};
pub use models::AuthRequirement;
pub use plugin_api::ValidationAuthorityClient;
