mod lint;
mod model;

pub use lint::lint;
pub use model::{Schema, SchemaDoc, Value, ValueDoc, Variable, VariableDoc, VariableKind};

use std::env;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use thiserror::Error;

const SCHEMA_ENV_VAR: &str = "VARFORM_SCHEMA";

/// failure to load or store a schema document
///
/// condition-level problems never land here; they degrade to diagnostics on
/// the loaded schema. this type covers the document itself being unusable.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed schema document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("schema I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// read a schema document from any reader
///
/// all-or-nothing: a malformed document yields an error and no schema,
/// never a partially applied one
pub fn read_from(reader: impl Read) -> Result<Schema, SchemaError> {
    let doc: SchemaDoc = serde_json::from_reader(reader)?;
    Ok(Schema::from_doc(doc))
}

/// write a schema document to any writer, pretty-printed
pub fn write_to(writer: impl Write, schema: &Schema) -> Result<(), SchemaError> {
    serde_json::to_writer_pretty(writer, &schema.to_doc())?;
    Ok(())
}

/// load a schema from a file path
pub fn load(path: &Path) -> Result<Schema> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open schema file: {}", path.display()))?;
    read_from(file).with_context(|| format!("failed to load schema file: {}", path.display()))
}

/// save a schema to a file path
pub fn save(path: &Path, schema: &Schema) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create schema file: {}", path.display()))?;
    write_to(file, schema).with_context(|| format!("failed to write schema file: {}", path.display()))
}

/// resolve the schema path: explicit flag > VARFORM_SCHEMA env var > default
pub fn resolve_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = env::var(SCHEMA_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    default_path()
}

/// default location: ~/.varform/schema.json
pub fn default_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow!("could not find home directory"))?
        .join(".varform")
        .join("schema.json"))
}

/// a small example schema showing enum gating, value conditions, and
/// conditional info text
pub fn example() -> Schema {
    let doc: SchemaDoc = serde_json::from_value(json!({
        "variables": [
            {
                "name": "Level",
                "type": "enum",
                "description": "Game difficulty",
                "values": [
                    { "name": "Easy" },
                    { "name": "Hard" }
                ]
            },
            {
                "name": "Boss",
                "type": "enum",
                "description": "Final encounter",
                "values": [
                    { "name": "Slime" },
                    { "name": "Dragon", "conditions": { "Level": "Hard" } }
                ]
            },
            {
                "name": "Reward",
                "type": "enum",
                "conditions": { "anyOf": [ { "Boss": "Dragon" }, { "Boss": "Slime" } ] },
                "values": [
                    { "name": "Gold" },
                    {
                        "name": "Legendary Sword",
                        "conditions": { "allOf": [ { "Level": "Hard" }, { "Boss": "Dragon" } ] }
                    }
                ]
            },
            {
                "name": "Hints",
                "type": "info",
                "description": "Pick a difficulty to see hints.",
                "values": [
                    { "description": "Take your time and explore.", "conditions": { "Level": "Easy" } },
                    { "description": "Stock up before the dragon.", "conditions": { "Level": "Hard" } }
                ]
            }
        ]
    }))
    .expect("example document is well-formed");
    Schema::from_doc(doc)
}
