//! Value model for the query engine
//!
//! Every operator works on `Item`, a dynamically typed value with JSON-like
//! shape. Composite items carry a reference identity so that identity-based
//! operators (set algebra, contains) and structural operators (joins,
//! grouping) can both be expressed.

mod compare;
mod equality;
mod item;

pub use compare::compare_items;
pub use equality::{identical, loosely_equal, structurally_equal, Comparer, Equality, IdentityKey};
pub use item::{Item, TypeTag};
