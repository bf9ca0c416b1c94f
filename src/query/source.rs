//! Sequence generation helpers

use crate::executor::{QueryError, QueryResult};
use crate::value::Item;

use super::sequence::Sequence;

/// `count` consecutive integers starting at `start`.
///
/// The range is produced lazily; a negative count fails with `NegativeCount`
/// and a range running past `i64::MAX` with `InvalidArgument`.
pub fn range(start: i64, count: i64) -> QueryResult<Sequence> {
    if count < 0 {
        return Err(QueryError::NegativeCount(count));
    }
    if count > 0 && start.checked_add(count - 1).is_none() {
        return Err(QueryError::invalid_argument(
            "range",
            format!("{} values from {} overflow", count, start),
        ));
    }
    Ok(Sequence::from_items(
        (0..count).map(move |offset| Item::Number((start + offset) as f64)),
    ))
}

/// The same item `count` times
pub fn repeat(item: Item, count: i64) -> QueryResult<Sequence> {
    if count < 0 {
        return Err(QueryError::NegativeCount(count));
    }
    Ok(Sequence::from_items(
        std::iter::repeat(item).take(count as usize),
    ))
}

pub fn empty() -> Sequence {
    Sequence::empty()
}
