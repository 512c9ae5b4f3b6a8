//! conditional visibility system
//!
//! a condition is a nested AND/OR expression over equality tests on other
//! variables' selections. variables and values carry conditions via their
//! `conditions` field in the schema document; the evaluator decides, per
//! selection state, what is currently shown.

mod eval;
mod parser;
mod types;

pub use eval::{evaluate, strictly_satisfied};
pub use parser::{parse_condition, parse_condition_at, Diagnostic};
pub use types::Condition;
