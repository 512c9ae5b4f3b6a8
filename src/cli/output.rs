//! output formatting utilities for scriptable CLI output
//!
//! uses JSON-RPC 2.0 format for machine-readable output:
//! - success: {"jsonrpc": "2.0", "result": {...}, "id": null}
//! - error: {"jsonrpc": "2.0", "error": {"code": N, "message": "...", "data": {...}}, "id": null}

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::IsTerminal;

use crate::analysis::Relationship;

/// JSON-RPC version constant
const JSONRPC_VERSION: &str = "2.0";

/// output mode determines how results are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// human-readable text output
    Text,
    /// machine-readable JSON-RPC 2.0 output
    Json,
    /// no output on success (errors still go to stderr)
    Quiet,
    /// one item name per line, ideal for piping to fzf/xargs
    Names,
}

impl OutputMode {
    /// determine output mode from CLI flags and environment
    ///
    /// priority: quiet > names > json > no_json > auto-detect
    pub fn from_flags(json: bool, no_json: bool, quiet: bool, names: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if names {
            return Self::Names;
        }
        if json {
            return Self::Json;
        }
        if no_json {
            return Self::Text;
        }
        // auto-detect: JSON when stdout is not a TTY (piped)
        if !std::io::stdout().is_terminal() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// JSON-RPC 2.0 success response
#[derive(Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub result: T,
    /// null for CLI responses (no request id)
    pub id: Option<String>,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            id: None,
        }
    }
}

/// JSON-RPC 2.0 error response
#[derive(Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<String>,
}

/// JSON-RPC 2.0 error object
#[derive(Serialize)]
pub struct RpcError {
    /// error code (using varform exit codes, offset by -32000 for app-specific errors)
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

/// additional error data
#[derive(Serialize)]
pub struct ErrorData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonRpcError {
    /// create error with standard JSON-RPC error code range
    /// varform uses -32000 to -32099 for application errors (per JSON-RPC spec)
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data: None,
            },
            id: None,
        }
    }

    pub fn with_suggestions(
        code: i32,
        message: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data: Some(ErrorData {
                    suggestions: if suggestions.is_empty() {
                        None
                    } else {
                        Some(suggestions)
                    },
                    details: None,
                }),
            },
            id: None,
        }
    }
}

/// convert varform exit code to JSON-RPC error code
/// JSON-RPC reserves -32000 to -32099 for server/application errors
fn to_jsonrpc_code(exit_code: i32) -> i32 {
    -32000 - exit_code
}

/// convert JSON-RPC error code back to varform exit code
#[allow(dead_code)]
pub fn from_jsonrpc_code(rpc_code: i32) -> i32 {
    -(rpc_code + 32000)
}

// ============================================================================
// Result data structures for different commands
// ============================================================================

/// result data for the show command: the whole form as currently rendered
#[derive(Serialize)]
pub struct ShowData {
    pub variables: Vec<ShowVariable>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stale_selections: Vec<StaleSelection>,
}

/// one variable in a show listing
#[derive(Serialize)]
pub struct ShowVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ShowValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
}

/// one value in a show listing
#[derive(Serialize)]
pub struct ShowValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub selected: bool,
}

/// a selected value no longer offered under the current selections
#[derive(Serialize)]
pub struct StaleSelection {
    pub variable: String,
    pub value: String,
}

/// result data for the visible command
#[derive(Serialize)]
pub struct VisibleData {
    pub variable: String,
    pub visible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// result data for the descriptions command
#[derive(Serialize)]
pub struct DescriptionsData {
    pub variable: String,
    pub descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applies_when: Vec<AppliesWhen>,
}

/// description text paired with the condition gating it
#[derive(Serialize)]
pub struct AppliesWhen {
    pub description: String,
    pub condition: String,
}

/// result data for the relationships command
#[derive(Serialize)]
pub struct RelationshipsData {
    pub relationships: BTreeMap<String, Relationship>,
}

/// result data for the verify command
#[derive(Serialize)]
pub struct VerifyData {
    pub valid: bool,
    pub findings: Vec<String>,
}

/// result data for schema subcommands that report a path
#[derive(Serialize)]
pub struct SchemaPathData {
    pub path: String,
}

// ============================================================================
// Output functions
// ============================================================================

/// print JSON-RPC success response to stdout
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse::new(data);
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print JSON-RPC error to stdout
pub fn print_json_error(code: i32, message: &str) {
    let error = JsonRpcError::new(code, message);
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}

/// print JSON-RPC error with suggestions
pub fn print_json_error_with_suggestions(code: i32, message: &str, suggestions: Vec<String>) {
    let error = JsonRpcError::with_suggestions(code, message, suggestions);
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}
