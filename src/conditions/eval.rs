//! condition evaluator
//!
//! evaluates a condition tree against the current selection state. pure
//! function of its inputs; no other shared state is read.

use super::types::Condition;
use crate::store::Selections;

/// evaluate a condition against the given selections
///
/// leaf rule: a variable with no selections passes unconditionally. an
/// unselected gating variable does not hide its dependents, it defers the
/// decision until the user acts. the same rule covers leaves that reference
/// variables absent from the schema entirely.
pub fn evaluate(condition: &Condition, selections: &Selections) -> bool {
    match condition {
        Condition::All(conditions) => {
            // empty All = true (vacuous truth)
            conditions.iter().all(|c| evaluate(c, selections))
        }
        Condition::Any(conditions) => {
            // empty Any = false
            conditions.iter().any(|c| evaluate(c, selections))
        }
        Condition::Leaf { variable, value } => {
            selections.is_unconstrained(variable) || selections.contains(variable, value)
        }
    }
}

/// strict variant used for hinting text: a leaf only passes when its value
/// is actually selected, with no defer-on-empty
///
/// `evaluate` answers "is this shown"; this answers "are its conditions
/// already met", so consumers can tell a pending dependency ("applies
/// when: Level = Hard") apart from a satisfied one
pub fn strictly_satisfied(condition: &Condition, selections: &Selections) -> bool {
    match condition {
        Condition::All(conditions) => conditions.iter().all(|c| strictly_satisfied(c, selections)),
        Condition::Any(conditions) => conditions.iter().any(|c| strictly_satisfied(c, selections)),
        Condition::Leaf { variable, value } => selections.contains(variable, value),
    }
}
