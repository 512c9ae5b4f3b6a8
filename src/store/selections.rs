//! the user's current choices, one set of chosen value names per variable
//!
//! an absent entry and an empty set mean the same thing: the variable is
//! unconstrained. nothing in here ever means "explicitly excludes everything".

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// selection state for one editing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selections(BTreeMap<String, BTreeSet<String>>);

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// the chosen values for a variable, if any entry exists
    pub fn get(&self, variable: &str) -> Option<&BTreeSet<String>> {
        self.0.get(variable)
    }

    /// true when the variable has no choices recorded (absent or empty entry)
    pub fn is_unconstrained(&self, variable: &str) -> bool {
        self.get(variable).map_or(true, |set| set.is_empty())
    }

    /// true when `value` is among the variable's chosen values
    pub fn contains(&self, variable: &str, value: &str) -> bool {
        self.get(variable).is_some_and(|set| set.contains(value))
    }

    /// replace the variable's whole selection set
    ///
    /// an empty iterator removes the entry, keeping "empty" and "absent"
    /// indistinguishable
    pub fn set<I, S>(&mut self, variable: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variable = variable.into();
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            self.0.remove(&variable);
        } else {
            self.0.insert(variable, set);
        }
    }

    /// flip one value's membership in the variable's selection set
    pub fn toggle(&mut self, variable: &str, value: &str) {
        let set = self.0.entry(variable.to_string()).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        if set.is_empty() {
            self.0.remove(variable);
        }
    }

    /// drop the variable's selections entirely
    pub fn clear(&mut self, variable: &str) {
        self.0.remove(variable);
    }

    /// drop all selections (used when a new schema replaces the old one)
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// iterate over variables that have at least one chosen value
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }
}

impl<S, V, I> FromIterator<(S, I)> for Selections
where
    S: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut selections = Selections::new();
        for (variable, values) in iter {
            selections.set(variable, values);
        }
        selections
    }
}
