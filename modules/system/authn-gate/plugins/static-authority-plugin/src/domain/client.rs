//! Implements `ValidationAuthorityClient` using the domain service.

use async_trait::async_trait;
use authn_gate_sdk::{AuthorityError, ValidationAuthorityClient};
use secrecy::{ExposeSecret, SecretString};

use super::service::Service;

#[async_trait]
impl ValidationAuthorityClient for Service {
    async fn validate_credential(&self, credential: &SecretString) -> Result<bool, AuthorityError> {
        Ok(self.is_live(credential.expose_secret()))
    }
}
