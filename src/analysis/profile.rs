//! static decomposition of condition trees
//!
//! flattens a tree into "which values of which variables are ever relevant",
//! deliberately discarding the AND/OR structure. the result over-approximates
//! satisfiability and is used for UI hinting only; `conditions::evaluate`
//! stays authoritative for visibility.

use std::collections::{BTreeMap, BTreeSet};

use crate::conditions::Condition;

/// per-variable allow-list extracted from a condition tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionProfile {
    /// every variable referenced anywhere in the tree
    pub variables: BTreeSet<String>,
    /// for each referenced variable, the values that satisfy some branch
    pub allowed_values: BTreeMap<String, BTreeSet<String>>,
}

impl ConditionProfile {
    /// the allow-list for one variable
    pub fn allowed(&self, variable: &str) -> Option<&BTreeSet<String>> {
        self.allowed_values.get(variable)
    }

    /// true when the tree referenced no variables at all
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// decompose a condition tree into its profile
///
/// every leaf contributes its (variable, value) pair regardless of whether
/// it sits under `All` or `Any` and regardless of nesting depth
pub fn analyze(condition: &Condition) -> ConditionProfile {
    let mut profile = ConditionProfile::default();
    collect(condition, &mut profile);
    profile
}

fn collect(condition: &Condition, profile: &mut ConditionProfile) {
    match condition {
        Condition::All(children) | Condition::Any(children) => {
            for child in children {
                collect(child, profile);
            }
        }
        Condition::Leaf { variable, value } => {
            profile.variables.insert(variable.clone());
            profile
                .allowed_values
                .entry(variable.clone())
                .or_default()
                .insert(value.clone());
        }
    }
}
