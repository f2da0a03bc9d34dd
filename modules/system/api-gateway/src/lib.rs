#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! API Gateway
//!
//! HTTP adapter in front of the two gates. For each request it:
//!
//! 1. resolves the route to an auth requirement and operation id
//! 2. runs the `AuthN` gate on the `Authorization` header
//! 3. runs the `AuthZ` gate against the operation's policy
//! 4. hands the typed [`Identity`](gatekeeper_security::Identity) to the
//!    handler as a request extension
//!
//! Rejections become a generic JSON error body carrying only a correlation
//! id; the specific cause is logged under the same id.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod module;
pub mod operation;

pub use config::ApiGatewayConfig;
pub use error::{ErrorDetail, ErrorResponse, GatewayError};
pub use module::ApiGateway;
pub use operation::OperationSpec;
