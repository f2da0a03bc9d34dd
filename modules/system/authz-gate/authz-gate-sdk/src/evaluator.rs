//! Pure permission evaluation.
//!
//! | operator | passes when                     | stops at      |
//! |----------|---------------------------------|---------------|
//! | `Or`     | at least one requirement held   | first hit     |
//! | `And`    | every requirement held          | first miss    |

use crate::models::{CapabilitySet, LogicalOperator, Policy};

/// Checks `capabilities` against `policy`.
#[must_use]
pub fn evaluate(policy: &Policy, capabilities: &CapabilitySet) -> bool {
    let mut requirements = policy.requirements().iter();
    match policy.operator() {
        LogicalOperator::Or => requirements.any(|r| capabilities.contains(r)),
        LogicalOperator::And => requirements.all(|r| capabilities.contains(r)),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn caps(items: &[&str]) -> CapabilitySet {
        items.iter().copied().collect()
    }

    #[test]
    fn or_policy_passes_with_any_requirement() {
        let policy = Policy::any_of(["Customer:View", "Order:View"]).unwrap();

        assert!(evaluate(&policy, &caps(&["Order:View"])));
        assert!(evaluate(&policy, &caps(&["Customer:View", "Order:View"])));
        assert!(!evaluate(&policy, &caps(&["Product:View"])));
        assert!(!evaluate(&policy, &caps(&[])));
    }

    #[test]
    fn and_policy_requires_every_requirement() {
        let policy = Policy::all_of(["Product:Update", "Stock:Update"]).unwrap();

        assert!(!evaluate(&policy, &caps(&["Product:Update"])));
        assert!(evaluate(&policy, &caps(&["Product:Update", "Stock:Update"])));
        assert!(evaluate(
            &policy,
            &caps(&["Product:Update", "Stock:Update", "Order:View"])
        ));
    }

    #[test]
    fn no_wildcard_matching() {
        let policy = Policy::any_of(["Order:View"]).unwrap();

        assert!(!evaluate(&policy, &caps(&["Order:*"])));
        assert!(!evaluate(&policy, &caps(&["*:*"])));
    }
}
