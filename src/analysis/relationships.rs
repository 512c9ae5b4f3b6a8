//! related / incompatible value classification
//!
//! advisory, second-order view over the schema: given what is selected right
//! now, which values elsewhere would work together and which can no longer
//! coexist. consumers use this to highlight compatible choices before the
//! user selects them; it never gates actual visibility.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::Schema;
use crate::store::Selections;

use super::profile::analyze;

/// advisory classification of one variable's values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// values that would be reachable/compatible in combination with the
    /// current selections
    pub related: std::collections::BTreeSet<String>,
    /// values excluded by a dependency somewhere in the schema
    pub incompatible: std::collections::BTreeSet<String>,
}

/// compute the relationship entry for every variable in the schema
///
/// pure function of (schema, selections): calling it twice with unchanged
/// inputs yields identical maps. values without a condition tree are never
/// placed in either set.
pub fn compute_relationships(
    schema: &Schema,
    selections: &Selections,
) -> BTreeMap<String, Relationship> {
    let mut relationships: BTreeMap<String, Relationship> = schema
        .variables
        .iter()
        .map(|v| (v.name.clone(), Relationship::default()))
        .collect();

    for variable in &schema.variables {
        for value in &variable.values {
            let Some(conditions) = &value.conditions else {
                continue;
            };
            let profile = analyze(conditions);
            if profile.is_empty() {
                continue;
            }

            // a selected value commits to its dependencies: project its
            // allow-list onto every variable it references, so the sibling
            // values it cannot coexist with visually recede
            let selected = value
                .name
                .as_deref()
                .is_some_and(|name| selections.contains(&variable.name, name));
            if selected {
                for required in &profile.variables {
                    let Some(target) = schema.variable(required) else {
                        continue; // dangling reference, nothing to project onto
                    };
                    let Some(allowed) = profile.allowed(required) else {
                        continue;
                    };
                    let Some(entry) = relationships.get_mut(required) else {
                        continue;
                    };
                    for candidate in target.value_names() {
                        if !allowed.contains(candidate) {
                            entry.incompatible.insert(candidate.to_string());
                        }
                    }
                    for name in allowed {
                        entry.related.insert(name.clone());
                    }
                }
            }

            // independent of selection: a value whose constrained variables
            // all have selections disjoint from its allow-list can never
            // become satisfiable. a constrained variable with no selection
            // yet keeps the value reachable (the empty selection defers)
            let satisfiable = profile.variables.iter().all(|required| {
                match selections.get(required) {
                    None => true,
                    Some(chosen) if chosen.is_empty() => true,
                    Some(chosen) => profile
                        .allowed(required)
                        .is_some_and(|allowed| chosen.iter().any(|c| allowed.contains(c))),
                }
            });
            if !satisfiable {
                if let (Some(name), Some(entry)) =
                    (&value.name, relationships.get_mut(&variable.name))
                {
                    entry.incompatible.insert(name.clone());
                }
            }
        }
    }

    relationships
}
