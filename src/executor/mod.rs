//! Query executor subsystem
//!
//! Interprets an ordered list of query parts against a source and produces
//! either a lazy sequence or a single value.
//!
//! # Execution flow
//!
//! 1. Validate the source
//! 2. Fuse each run of ordering parts into one multi-key stable sort
//! 3. Dispatch every other part to its operator in order
//! 4. Return the running value

mod errors;
mod executor;
mod result;

pub use errors::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use result::Output;
