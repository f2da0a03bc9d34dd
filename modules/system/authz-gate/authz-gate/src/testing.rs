//! Test helpers: a scripted permission source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use authz_gate_sdk::{PermissionSource, PermissionSourceError};
use parking_lot::Mutex;
use secrecy::SecretString;

/// Permission source answering from an in-memory grant table, counting its calls.
#[derive(Default)]
pub struct ScriptedPermissionSource {
    grants: Mutex<HashMap<String, Vec<String>>>,
    failure: Mutex<Option<PermissionSourceError>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedPermissionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `capabilities` to `subject_id`, replacing earlier grants.
    #[must_use]
    pub fn with_grant(self, subject_id: &str, capabilities: &[&str]) -> Self {
        self.grant(subject_id, capabilities);
        self
    }

    /// Each call sleeps for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn grant(&self, subject_id: &str, capabilities: &[&str]) {
        self.grants.lock().insert(
            subject_id.to_owned(),
            capabilities.iter().map(|c| (*c).to_owned()).collect(),
        );
    }

    /// Makes every following call fail with `error`; `None` restores service.
    pub fn set_failure(&self, error: Option<PermissionSourceError>) {
        *self.failure.lock() = error;
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionSource for ScriptedPermissionSource {
    async fn resolve_capabilities(
        &self,
        subject_id: &str,
        _credential: &SecretString,
    ) -> Result<Vec<String>, PermissionSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failure = self.failure.lock().clone();
        if let Some(e) = failure {
            return Err(e);
        }
        Ok(self.grants.lock().get(subject_id).cloned().unwrap_or_default())
    }
}
