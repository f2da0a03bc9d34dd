//! Domain models for the `AuthN` gate module.

use serde::{Deserialize, Serialize};

/// Whether an operation requires an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRequirement {
    /// Anonymous access allowed; the credential is not inspected.
    None,
    /// A valid bearer credential is required.
    Required,
}
