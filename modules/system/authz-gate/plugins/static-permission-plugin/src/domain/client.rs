//! Implements `PermissionSource` using the domain service.

use async_trait::async_trait;
use authz_gate_sdk::{PermissionSource, PermissionSourceError};
use secrecy::SecretString;

use super::service::Service;

#[async_trait]
impl PermissionSource for Service {
    async fn resolve_capabilities(
        &self,
        subject_id: &str,
        _credential: &SecretString,
    ) -> Result<Vec<String>, PermissionSourceError> {
        Ok(self.capabilities_of(subject_id).to_vec())
    }
}
