//! Domain layer for the `AuthZ` gate.

pub mod error;
pub mod local_client;
pub mod registry;
pub mod service;

pub use error::DomainError;
pub use local_client::AuthZGateLocalClient;
pub use registry::PolicyRegistry;
pub use service::AuthorizationGate;
