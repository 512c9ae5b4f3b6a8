//! schema/selection store
//!
//! `Session` owns exactly one schema and one selection state for the
//! duration of an editing session. every query is a pure function of the
//! two; there is no derived cache, so a mutation is immediately observable
//! by the next query. single-writer discipline is the embedding host's job.

mod selections;

pub use selections::Selections;

use std::collections::BTreeMap;

use crate::analysis::{compute_relationships, Relationship};
use crate::conditions::{evaluate, strictly_satisfied};
use crate::schema::{Schema, Value, Variable, VariableKind};

/// one form-editing session: a schema plus the user's current choices
#[derive(Debug, Clone, Default)]
pub struct Session {
    schema: Schema,
    selections: Selections,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            selections: Selections::new(),
        }
    }

    /// replace the schema wholesale; selections always reset to empty
    pub fn load_schema(&mut self, schema: Schema) {
        self.schema = schema;
        self.selections.clear_all();
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// replace one variable's selection set
    pub fn set_selection<I, S>(&mut self, variable: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections.set(variable, values);
    }

    /// flip one value in one variable's selection set
    pub fn toggle_selection(&mut self, variable: &str, value: &str) {
        self.selections.toggle(variable, value);
    }

    pub fn clear_selection(&mut self, variable: &str) {
        self.selections.clear(variable);
    }

    /// whether the variable's own conditions pass right now
    ///
    /// `None` when no such variable exists in the schema
    pub fn is_visible(&self, variable: &str) -> Option<bool> {
        self.schema
            .variable(variable)
            .map(|v| evaluate(&v.conditions, &self.selections))
    }

    /// the variable's values whose conditions currently pass
    pub fn visible_values(&self, variable: &str) -> Option<Vec<&Value>> {
        let variable = self.schema.variable(variable)?;
        Some(
            variable
                .values
                .iter()
                .filter(|v| self.value_passes(v))
                .collect(),
        )
    }

    /// displayed text for an info variable under the current selections
    ///
    /// yields the description of every value whose conditions pass, falling
    /// back to the variable's own description when no value matches or the
    /// variable carries no values at all
    pub fn visible_descriptions(&self, variable: &str) -> Option<Vec<String>> {
        let variable = self.schema.variable(variable)?;

        let descriptions: Vec<String> = variable
            .values
            .iter()
            .filter(|v| self.value_passes(v))
            .filter_map(|v| v.description.clone())
            .collect();

        if descriptions.is_empty() {
            Some(variable.description.iter().cloned().collect())
        } else {
            Some(descriptions)
        }
    }

    /// descriptions shown only because their conditions defer on an empty
    /// selection, paired with the rendered condition text
    ///
    /// used to annotate hints like "applies when: Level = Hard" while the
    /// gating variable is still unselected
    pub fn applies_when(&self, variable: &str) -> Vec<(String, String)> {
        let Some(variable) = self.schema.variable(variable) else {
            return Vec::new();
        };
        variable
            .values
            .iter()
            .filter(|v| self.value_passes(v))
            .filter_map(|v| {
                let description = v.description.clone()?;
                let conditions = v.conditions.as_ref()?;
                if strictly_satisfied(conditions, &self.selections) {
                    None
                } else {
                    Some((description, conditions.to_string()))
                }
            })
            .collect()
    }

    /// advisory related/incompatible classification for every variable
    pub fn relationships(&self) -> BTreeMap<String, Relationship> {
        compute_relationships(&self.schema, &self.selections)
    }

    /// selected values that are no longer offered under the current state:
    /// the variable disappeared, is hidden, does not offer the value, or
    /// the value's own conditions now fail
    ///
    /// reported, never auto-cleared: evaluation stays side-effect-free and
    /// the consumer decides whether to drop them
    pub fn stale_selections(&self) -> Vec<(String, String)> {
        let mut stale = Vec::new();
        for (variable_name, chosen) in self.selections.iter() {
            for value_name in chosen {
                if !self.selection_is_offered(variable_name, value_name) {
                    stale.push((variable_name.clone(), value_name.clone()));
                }
            }
        }
        stale
    }

    fn selection_is_offered(&self, variable: &str, value: &str) -> bool {
        let Some(var) = self.schema.variable(variable) else {
            return false;
        };
        if !evaluate(&var.conditions, &self.selections) {
            return false;
        }
        var.values
            .iter()
            .filter(|v| v.name.as_deref() == Some(value))
            .any(|v| self.value_passes(v))
    }

    fn value_passes(&self, value: &Value) -> bool {
        value
            .conditions
            .as_ref()
            .map_or(true, |c| evaluate(c, &self.selections))
    }

    /// enum variables currently shown, in schema order (rendering helper)
    pub fn visible_variables(&self) -> Vec<&Variable> {
        self.schema
            .variables
            .iter()
            .filter(|v| evaluate(&v.conditions, &self.selections))
            .collect()
    }

    /// convenience for hosts that care about selectability
    pub fn is_selectable(&self, variable: &str) -> bool {
        self.schema
            .variable(variable)
            .is_some_and(|v| v.kind == VariableKind::Enum)
    }
}
