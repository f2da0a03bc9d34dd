//! Domain models for the `AuthZ` gate module.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// A single `Module:Action` permission.
///
/// Both parts are non-empty and free of `:` and whitespace. Comparison is
/// exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionRequirement {
    value: String,
    split: usize,
}

impl PermissionRequirement {
    /// # Errors
    ///
    /// `InvalidPermission` if either part is empty or contains `:` or whitespace.
    pub fn new(module: &str, action: &str) -> Result<Self, PolicyError> {
        format!("{module}:{action}").parse()
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.value[..self.split]
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.value[self.split + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains(':') && !part.contains(char::is_whitespace)
}

impl FromStr for PermissionRequirement {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((module, action)) if valid_part(module) && valid_part(action) => Ok(Self {
                value: s.to_owned(),
                split: module.len(),
            }),
            _ => Err(PolicyError::InvalidPermission(s.to_owned())),
        }
    }
}

impl fmt::Display for PermissionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// How a policy combines its requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    /// At least one requirement must be held.
    #[default]
    Or,
    /// Every requirement must be held.
    And,
}

/// Permission requirements attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    operator: LogicalOperator,
    requirements: Vec<PermissionRequirement>,
}

impl Policy {
    /// # Errors
    ///
    /// `Empty` if `requirements` is empty.
    pub fn new(
        operator: LogicalOperator,
        requirements: Vec<PermissionRequirement>,
    ) -> Result<Self, PolicyError> {
        if requirements.is_empty() {
            return Err(PolicyError::Empty);
        }
        Ok(Self {
            operator,
            requirements,
        })
    }

    /// Builds a policy from `Module:Action` strings.
    ///
    /// # Errors
    ///
    /// `Empty` for no permissions, `InvalidPermission` for a malformed one.
    pub fn parse<I, S>(operator: LogicalOperator, permissions: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requirements = permissions
            .into_iter()
            .map(|p| p.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(operator, requirements)
    }

    /// Passes if any of `permissions` is held.
    ///
    /// # Errors
    ///
    /// See [`Policy::parse`].
    pub fn any_of<I, S>(permissions: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse(LogicalOperator::Or, permissions)
    }

    /// Passes if all of `permissions` are held.
    ///
    /// # Errors
    ///
    /// See [`Policy::parse`].
    pub fn all_of<I, S>(permissions: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse(LogicalOperator::And, permissions)
    }

    #[must_use]
    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    #[must_use]
    pub fn requirements(&self) -> &[PermissionRequirement] {
        &self.requirements
    }
}

/// Capabilities granted to a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(HashSet<String>);

impl CapabilitySet {
    #[must_use]
    pub fn contains(&self, requirement: &PermissionRequirement) -> bool {
        self.0.contains(requirement.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
