//! core types for the condition system

use std::fmt;

/// the condition AST - a boolean expression over other variables' selections
///
/// a tree is one of:
/// - `All`: every child must hold (empty list is vacuously true)
/// - `Any`: at least one child must hold (empty list is false)
/// - `Leaf`: equality test, "variable X has value Y selected"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// all conditions must be true (AND)
    All(Vec<Condition>),
    /// any condition must be true (OR)
    Any(Vec<Condition>),
    /// a single variable/value equality test
    Leaf {
        /// name of the referenced variable (may not exist in the schema)
        variable: String,
        /// the value that must be among the variable's selections
        value: String,
    },
}

impl Condition {
    /// create an AND condition
    pub fn all(conditions: Vec<Condition>) -> Self {
        Condition::All(conditions)
    }

    /// create an OR condition
    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any(conditions)
    }

    /// create an equality leaf
    pub fn leaf(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Leaf {
            variable: variable.into(),
            value: value.into(),
        }
    }

    /// the unconditioned tree (always true)
    pub fn empty() -> Self {
        Condition::All(vec![])
    }

    /// check if this condition is empty (always true)
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::All(v) => v.is_empty(),
            _ => false,
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::empty()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::All(conditions) => {
                if conditions.is_empty() {
                    return write!(f, "always");
                }
                write_joined(f, conditions, " AND ")
            }
            Condition::Any(conditions) => {
                if conditions.is_empty() {
                    return write!(f, "never");
                }
                write_joined(f, conditions, " OR ")
            }
            Condition::Leaf { variable, value } => write!(f, "{} = {}", variable, value),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    for (i, c) in conditions.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        // parenthesize nested groups so AND/OR precedence stays readable
        match c {
            Condition::Leaf { .. } => write!(f, "{}", c)?,
            _ => write!(f, "({})", c)?,
        }
    }
    Ok(())
}
