//! Service implementation for the static permission source plugin.

use std::collections::HashMap;

use crate::config::StaticPermissionConfig;

/// Static grant table.
pub struct Service {
    default_capabilities: Vec<String>,
    subjects: HashMap<String, Vec<String>>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticPermissionConfig) -> Self {
        Self {
            default_capabilities: cfg.default_capabilities.clone(),
            subjects: cfg
                .subjects
                .iter()
                .map(|(subject, caps)| (subject.clone(), caps.clone()))
                .collect(),
        }
    }

    /// Capabilities granted to `subject_id`.
    #[must_use]
    pub fn capabilities_of(&self, subject_id: &str) -> &[String] {
        self.subjects
            .get(subject_id)
            .unwrap_or(&self.default_capabilities)
    }
}
