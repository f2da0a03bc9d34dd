//! Operation id to policy lookup, built once at startup.

use std::collections::{BTreeMap, HashMap};

use authz_gate_sdk::{Policy, PolicyError};

use crate::config::PolicyConfig;

/// Read-only at request time; shared by `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, Policy>,
}

impl PolicyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from configured policies.
    ///
    /// # Errors
    ///
    /// `InvalidPolicy` naming the first operation whose policy is empty or
    /// lists a malformed permission.
    pub fn from_config(policies: &BTreeMap<String, PolicyConfig>) -> Result<Self, PolicyError> {
        let mut registry = Self::new();
        for (operation, cfg) in policies {
            let policy = Policy::parse(cfg.operator, &cfg.permissions).map_err(|e| {
                PolicyError::InvalidPolicy {
                    operation: operation.clone(),
                    source: Box::new(e),
                }
            })?;
            registry.register(operation, policy)?;
        }
        Ok(registry)
    }

    /// # Errors
    ///
    /// `EmptyOperation` for a blank operation id, `DuplicateOperation` if
    /// `operation` already has a policy.
    pub fn register(&mut self, operation: &str, policy: Policy) -> Result<(), PolicyError> {
        if operation.trim().is_empty() {
            return Err(PolicyError::EmptyOperation);
        }
        if self.policies.contains_key(operation) {
            return Err(PolicyError::DuplicateOperation(operation.to_owned()));
        }
        self.policies.insert(operation.to_owned(), policy);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn with(mut self, operation: &str, policy: Policy) -> Result<Self, PolicyError> {
        self.register(operation, policy)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, operation: &str) -> Option<&Policy> {
        self.policies.get(operation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
