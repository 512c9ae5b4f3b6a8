//! advisory schema lints
//!
//! the engine itself is deliberately permissive: dangling references inside
//! condition trees evaluate as unconstrained and never fail. authors still
//! want to hear about them, so `lint` reports everything suspicious as a
//! human-readable finding list. nothing here affects evaluation.

use std::collections::BTreeSet;

use crate::analysis::analyze;
use crate::conditions::Condition;

use super::model::{Schema, VariableKind};

/// check a loaded schema and return a list of findings (empty = clean)
pub fn lint(schema: &Schema) -> Vec<String> {
    let mut findings = Vec::new();

    // condition fragments dropped during load
    for diagnostic in schema.diagnostics() {
        findings.push(format!("{}: ignored condition fragment: {}", diagnostic.path, diagnostic.message));
    }

    let mut seen = BTreeSet::new();
    for (i, variable) in schema.variables.iter().enumerate() {
        let prefix = format!("variables[{}]", i);

        if variable.name.trim().is_empty() {
            findings.push(format!("{}: variable name is empty", prefix));
        } else if !seen.insert(variable.name.as_str()) {
            findings.push(format!(
                "{}: duplicate variable name '{}'",
                prefix, variable.name
            ));
        }

        for (j, value) in variable.values.iter().enumerate() {
            match variable.kind {
                VariableKind::Enum if value.name.is_none() => {
                    findings.push(format!(
                        "{}.values[{}]: enum value has no 'name'",
                        prefix, j
                    ));
                }
                VariableKind::Info if value.description.is_none() => {
                    findings.push(format!(
                        "{}.values[{}]: info value has no 'description'",
                        prefix, j
                    ));
                }
                _ => {}
            }
        }

        check_references(schema, &variable.conditions, &format!("{}.conditions", prefix), &mut findings);
        for (j, value) in variable.values.iter().enumerate() {
            if let Some(conditions) = &value.conditions {
                check_references(
                    schema,
                    conditions,
                    &format!("{}.values[{}].conditions", prefix, j),
                    &mut findings,
                );
            }
        }
    }

    findings
}

/// flag leaves that can never constrain anything: unknown variables, values
/// a variable does not offer, and references to info variables (which are
/// never selectable)
fn check_references(schema: &Schema, condition: &Condition, path: &str, findings: &mut Vec<String>) {
    let profile = analyze(condition);

    for variable in &profile.variables {
        let Some(target) = schema.variable(variable) else {
            findings.push(format!(
                "{}: references unknown variable '{}'",
                path, variable
            ));
            continue;
        };

        if target.kind == VariableKind::Info {
            findings.push(format!(
                "{}: references info variable '{}', which is never selectable",
                path, variable
            ));
            continue;
        }

        if let Some(allowed) = profile.allowed(variable) {
            let offered: BTreeSet<&str> = target.value_names().collect();
            for value in allowed {
                if !offered.contains(value.as_str()) {
                    findings.push(format!(
                        "{}: variable '{}' has no value '{}'",
                        path, variable, value
                    ));
                }
            }
        }
    }
}
