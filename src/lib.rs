//! seqquery - deferred query execution over in-memory sequences
//!
//! A query is an ordered list of parts (operator plus arguments) applied to
//! an array source. Non-terminal operators build a lazy pipeline; terminal
//! operators consume it and return a single value.
//!
//! ```ignore
//! use seqquery::{Item, Query};
//!
//! let count = Query::new()
//!     .where_(|x| x.as_f64() > Some(1.0))
//!     .count()
//!     .execute(serde_json::json!([1, 2, 3]))?
//!     .into_value();
//! ```

pub mod config;
pub mod executor;
pub mod observability;
pub mod operators;
pub mod query;
pub mod value;

pub use config::ExecutorConfig;
pub use executor::{Output, QueryError, QueryExecutor, QueryResult};
pub use query::{Argument, Callable, OperatorKind, Query, QueryPart, Sequence};
pub use value::Item;
