//! Domain layer for the `AuthN` gate.

pub mod error;
pub mod local_client;
pub mod parser;
pub mod service;

pub use error::DomainError;
pub use local_client::AuthNGateLocalClient;
pub use parser::CredentialParser;
pub use service::AuthenticationGate;
