//! Configuration for the static permission source plugin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticPermissionConfig {
    /// Granted to subjects without their own entry.
    pub default_capabilities: Vec<String>,

    /// Per-subject grants, replacing the defaults for that subject.
    pub subjects: BTreeMap<String, Vec<String>>,
}
