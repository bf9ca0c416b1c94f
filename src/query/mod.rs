//! Query model
//!
//! Operator kinds, query parts and their arguments, the lazy `Sequence`
//! stream and helpers for building sources and part lists.

mod builder;
mod part;
mod sequence;
pub mod source;

pub use builder::Query;
pub use part::{Argument, BinaryFn, Callable, OperatorKind, QueryPart, UnaryFn};
pub use sequence::Sequence;
