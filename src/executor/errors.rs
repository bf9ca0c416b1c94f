//! Query error types
//!
//! Error codes:
//! - QUERY_INVALID_SOURCE
//! - QUERY_UNKNOWN_OPERATOR
//! - QUERY_INVALID_ARGUMENT
//! - QUERY_INVALID_CAST
//! - QUERY_EMPTY_SEQUENCE
//! - QUERY_NO_MATCH
//! - QUERY_MULTIPLE_MATCHES
//! - QUERY_INDEX_OUT_OF_RANGE
//! - QUERY_NEGATIVE_COUNT
//!
//! All errors are raised synchronously to the immediate caller and never
//! retried.

use thiserror::Error;

use crate::value::TypeTag;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid argument for {operator}: {reason}")]
    InvalidArgument {
        operator: &'static str,
        reason: String,
    },

    #[error("Cannot cast {from} to {to}")]
    InvalidCast { from: TypeTag, to: TypeTag },

    #[error("{operator}: sequence contains no elements")]
    EmptySequence { operator: &'static str },

    #[error("{operator}: no element satisfies the predicate")]
    NoMatch { operator: &'static str },

    #[error("{operator}: more than one element satisfies the predicate")]
    MultipleMatches { operator: &'static str },

    #[error("Index {index} is out of range for a sequence of length {length}")]
    IndexOutOfRange { index: i64, length: usize },

    #[error("Count must not be negative: {0}")]
    NegativeCount(i64),
}

impl QueryError {
    pub(crate) fn invalid_argument(operator: &'static str, reason: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            operator,
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidSource(_) => "QUERY_INVALID_SOURCE",
            QueryError::UnknownOperator(_) => "QUERY_UNKNOWN_OPERATOR",
            QueryError::InvalidArgument { .. } => "QUERY_INVALID_ARGUMENT",
            QueryError::InvalidCast { .. } => "QUERY_INVALID_CAST",
            QueryError::EmptySequence { .. } => "QUERY_EMPTY_SEQUENCE",
            QueryError::NoMatch { .. } => "QUERY_NO_MATCH",
            QueryError::MultipleMatches { .. } => "QUERY_MULTIPLE_MATCHES",
            QueryError::IndexOutOfRange { .. } => "QUERY_INDEX_OUT_OF_RANGE",
            QueryError::NegativeCount(_) => "QUERY_NEGATIVE_COUNT",
        }
    }

    /// Returns true for the absence conditions that `...OrDefault`
    /// operators turn into a "no value" result
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            QueryError::EmptySequence { .. }
                | QueryError::NoMatch { .. }
                | QueryError::IndexOutOfRange { .. }
        )
    }
}
