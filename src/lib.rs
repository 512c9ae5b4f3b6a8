// library crate for varform
// exposes the evaluation engine for embedding and for the CLI binary

pub mod analysis;
pub mod cli;
pub mod conditions;
pub mod schema;
pub mod store;
