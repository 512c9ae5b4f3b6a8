//! exit codes for varform commands
//!
//! these follow Unix conventions where 0 = success and non-zero = error
//! specific codes help scripts distinguish between failure types

#![allow(dead_code)]

/// command completed successfully
pub const SUCCESS: i32 = 0;

/// general or unknown error
pub const ERROR: i32 = 1;

/// named variable does not exist in the schema
pub const VARIABLE_NOT_FOUND: i32 = 2;

/// named value does not exist on the variable
pub const VALUE_NOT_FOUND: i32 = 3;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 4;

/// schema file missing or malformed
pub const SCHEMA_ERROR: i32 = 5;

/// variable exists but is hidden under the current selections
pub const NOT_VISIBLE: i32 = 6;
