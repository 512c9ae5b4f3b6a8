//! schema data model
//!
//! the wire shape (`SchemaDoc` and friends) mirrors the schema document
//! exactly and derives serde both ways. `Schema` is the parsed form the
//! engine works with: condition JSON already turned into `Condition` trees,
//! with diagnostics for anything that had to be ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::conditions::{parse_condition_at, Condition, Diagnostic};

/// whether a variable offers selectable options or conditional text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// selectable options, each value carries a `name`
    #[default]
    Enum,
    /// conditionally displayed text, each value carries a `description`
    Info,
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableKind::Enum => write!(f, "enum"),
            VariableKind::Info => write!(f, "info"),
        }
    }
}

/// schema document as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDoc {
    pub variables: Vec<VariableDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDoc {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: VariableKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValueDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<JsonValue>,
}

/// a loaded schema, conditions parsed
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub variables: Vec<Variable>,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
    pub description: Option<String>,
    /// gates whether the variable itself is shown; empty = always
    pub conditions: Condition,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct Value {
    /// the selectable option name (enum variables)
    pub name: Option<String>,
    /// the displayed text (info variables)
    pub description: Option<String>,
    /// gates when the value is selectable/displayed; `None` means the value
    /// carried no condition tree at all, which the relationship analyzer
    /// treats differently from an (always-true) empty tree
    pub conditions: Option<Condition>,
}

impl Schema {
    /// build a schema from a wire document, parsing every condition tree
    ///
    /// never fails: condition-level problems become diagnostics, per the
    /// permissive evaluation contract
    pub fn from_doc(doc: SchemaDoc) -> Self {
        let mut diagnostics = Vec::new();
        let variables = doc
            .variables
            .into_iter()
            .map(|v| Variable::from_doc(v, &mut diagnostics))
            .collect();
        Self {
            variables,
            diagnostics,
        }
    }

    /// emit the schema back to the wire shape
    pub fn to_doc(&self) -> SchemaDoc {
        SchemaDoc {
            variables: self.variables.iter().map(Variable::to_doc).collect(),
        }
    }

    /// look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    /// notes about condition fragments ignored while loading
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Variable {
    fn from_doc(doc: VariableDoc, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let conditions = match &doc.conditions {
            Some(json) => {
                parse_condition_at(json, &format!("{}.conditions", doc.name), diagnostics)
            }
            None => Condition::empty(),
        };
        let values = doc
            .values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Value::from_doc(v, &doc.name, i, diagnostics))
            .collect();
        Self {
            name: doc.name,
            kind: doc.kind,
            description: doc.description,
            conditions,
            values,
        }
    }

    fn to_doc(&self) -> VariableDoc {
        VariableDoc {
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
            conditions: if self.conditions.is_empty() {
                None
            } else {
                Some(self.conditions.to_json())
            },
            values: self.values.iter().map(Value::to_doc).collect(),
        }
    }

    /// names of this variable's named values
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(|v| v.name.as_deref())
    }
}

impl Value {
    fn from_doc(
        doc: ValueDoc,
        variable: &str,
        index: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let conditions = doc.conditions.as_ref().map(|json| {
            parse_condition_at(
                json,
                &format!("{}.values[{}].conditions", variable, index),
                diagnostics,
            )
        });
        Self {
            name: doc.name,
            description: doc.description,
            conditions,
        }
    }

    fn to_doc(&self) -> ValueDoc {
        ValueDoc {
            name: self.name.clone(),
            description: self.description.clone(),
            conditions: self.conditions.as_ref().map(Condition::to_json),
        }
    }
}
