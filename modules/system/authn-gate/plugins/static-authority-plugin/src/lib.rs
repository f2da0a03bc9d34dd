#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Validation Authority Plugin
//!
//! Answers credential-liveness checks from configuration, for development
//! and testing.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Every credential is live unless its subject
//!   is listed in `revoked_subjects`.
//!
//! - **`static_tokens`**: Only the listed tokens are live. Tokens are kept as
//!   SHA-256 digests after loading. `revoked_subjects` still applies.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authority:
//!   mode: static_tokens
//!   tokens:
//!     - "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhbGljZSIsImV4cCI6NDEwMjQ0NDgwMH0.sig"
//!   revoked_subjects: ["mallory"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use config::{AuthorityMode, StaticAuthorityConfig};
pub use module::init;
