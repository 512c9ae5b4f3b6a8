//! condition parser - converts schema-document JSON to the condition AST
//!
//! the wire shape is:
//! - `{}`                      -> always true
//! - `{"allOf": [tree, ...]}`  -> AND over the children
//! - `{"anyOf": [tree, ...]}`  -> OR over the children
//! - `{"Var": "Value"}`        -> equality leaf
//! - multiple leaf keys in one object -> implicit AND
//!
//! parsing never fails: condition content is authored data and the engine's
//! contract is permissive, so malformed fragments are dropped and reported
//! as path-tagged diagnostics instead of errors.

use serde_json::{json, Map, Value as JsonValue};

use super::types::Condition;

/// a note about a condition fragment that was ignored during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// location within the document, e.g. "Boss.values[0].conditions.allOf[1]"
    pub path: String,
    /// what was wrong with the fragment
    pub message: String,
}

impl Diagnostic {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// parse a JSON value into a condition, discarding diagnostics
pub fn parse_condition(json: &JsonValue) -> Condition {
    let mut diagnostics = Vec::new();
    parse_condition_at(json, "", &mut diagnostics)
}

/// parse a JSON value into a condition, collecting diagnostics for every
/// fragment that had to be ignored
pub fn parse_condition_at(
    json: &JsonValue,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Condition {
    match json {
        JsonValue::Object(obj) => parse_object(obj, path, diagnostics),
        other => {
            diagnostics.push(Diagnostic::new(
                path,
                format!("expected an object, got {}", type_name(other)),
            ));
            Condition::empty()
        }
    }
}

fn parse_object(
    obj: &Map<String, JsonValue>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Condition {
    // logical group keys win over leaf keys, allOf checked first
    if let Some(value) = obj.get("allOf") {
        note_extra_keys(obj, "allOf", path, diagnostics);
        return parse_group(value, true, path, diagnostics);
    }
    if let Some(value) = obj.get("anyOf") {
        note_extra_keys(obj, "anyOf", path, diagnostics);
        return parse_group(value, false, path, diagnostics);
    }

    // leaf mapping; multiple keys = implicit AND
    let mut leaves = Vec::new();
    for (variable, value) in obj {
        match value {
            JsonValue::String(s) => leaves.push(Condition::leaf(variable, s)),
            other => {
                diagnostics.push(Diagnostic::new(
                    &join_path(path, variable),
                    format!("expected a value name string, got {}", type_name(other)),
                ));
            }
        }
    }

    match leaves.len() {
        0 => Condition::empty(), // empty object (or nothing usable) = unconditioned
        1 => leaves.remove(0),
        _ => Condition::All(leaves),
    }
}

fn parse_group(
    value: &JsonValue,
    is_all: bool,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Condition {
    let key = if is_all { "allOf" } else { "anyOf" };
    let group_path = join_path(path, key);

    let Some(arr) = value.as_array() else {
        diagnostics.push(Diagnostic::new(
            &group_path,
            format!("'{}' must be an array, got {}", key, type_name(value)),
        ));
        return Condition::empty();
    };

    let children: Vec<Condition> = arr
        .iter()
        .enumerate()
        .map(|(i, v)| parse_condition_at(v, &format!("{}[{}]", group_path, i), diagnostics))
        .collect();

    if is_all {
        Condition::All(children)
    } else {
        Condition::Any(children)
    }
}

fn note_extra_keys(
    obj: &Map<String, JsonValue>,
    kept: &str,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for key in obj.keys().filter(|k| *k != kept) {
        diagnostics.push(Diagnostic::new(
            &join_path(path, key),
            format!("ignored alongside '{}'", kept),
        ));
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

impl Condition {
    /// emit the condition back to the schema-document JSON shape
    pub fn to_json(&self) -> JsonValue {
        match self {
            Condition::All(children) => {
                if children.is_empty() {
                    json!({})
                } else {
                    json!({ "allOf": children.iter().map(|c| c.to_json()).collect::<Vec<_>>() })
                }
            }
            Condition::Any(children) => {
                json!({ "anyOf": children.iter().map(|c| c.to_json()).collect::<Vec<_>>() })
            }
            Condition::Leaf { variable, value } => {
                let mut leaf = Map::new();
                leaf.insert(variable.clone(), JsonValue::String(value.clone()));
                JsonValue::Object(leaf)
            }
        }
    }
}
