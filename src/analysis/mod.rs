//! second-order condition analysis
//!
//! while `conditions::evaluate` answers "is this shown right now",
//! this module answers "what could still fit together": it projects
//! condition trees into per-variable allow-lists and classifies values
//! as related or incompatible relative to the current selections.

mod profile;
mod relationships;

pub use profile::{analyze, ConditionProfile};
pub use relationships::{compute_relationships, Relationship};
