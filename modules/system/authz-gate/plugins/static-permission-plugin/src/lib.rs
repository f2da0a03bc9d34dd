#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Permission Source Plugin
//!
//! Grants capabilities from configuration, for development and testing.
//! Subjects listed under `subjects` receive exactly their listed
//! capabilities; everyone else receives `default_capabilities`.
//!
//! ## Configuration
//!
//! ```yaml
//! static_permissions:
//!   default_capabilities: ["Order:View"]
//!   subjects:
//!     alice: ["Product:Update", "Stock:Update"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use config::StaticPermissionConfig;
pub use module::init;
