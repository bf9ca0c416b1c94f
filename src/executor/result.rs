//! Result types for query execution

use crate::query::Sequence;
use crate::value::Item;

use super::errors::{QueryError, QueryResult};

/// The running value of a pipeline, and its final result
#[derive(Debug)]
pub enum Output {
    /// Lazy derived sequence from a non-terminal operator
    Sequence(Sequence),
    /// Scalar, boolean or element from a terminal operator
    Value(Item),
    /// "No value" from an `...OrDefault` operator
    Absent,
}

impl Output {
    /// Wraps an optional element, `None` becoming `Absent`
    pub fn from_option(value: Option<Item>) -> Self {
        value.map_or(Output::Absent, Output::Value)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Output::Sequence(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Output::Absent)
    }

    /// Coerces to a sequence. Array values are iterated; anything else is
    /// not a valid input for a sequence operator.
    pub fn into_sequence(self) -> QueryResult<Sequence> {
        match self {
            Output::Sequence(sequence) => Ok(sequence),
            Output::Value(item) => Sequence::from_array(&item),
            Output::Absent => Err(QueryError::InvalidSource("input is absent".into())),
        }
    }

    /// Drains a sequence result into its items
    pub fn into_items(self) -> QueryResult<Vec<Item>> {
        self.into_sequence()?.collect_items()
    }

    /// Returns the terminal value; `None` for absence and for sequences
    pub fn into_value(self) -> Option<Item> {
        match self {
            Output::Value(item) => Some(item),
            Output::Sequence(_) | Output::Absent => None,
        }
    }
}
