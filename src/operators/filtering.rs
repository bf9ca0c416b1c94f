//! Filtering operators: where, ofType, cast

use crate::executor::QueryError;
use crate::query::{Callable, Sequence};
use crate::value::TypeTag;

/// Keeps items the predicate accepts
pub fn filter(source: Sequence, predicate: Callable) -> Sequence {
    Sequence::new(source.filter(move |pulled| match pulled {
        Ok(item) => predicate.test(item),
        Err(_) => true,
    }))
}

/// Keeps items of the given runtime type
pub fn of_type(source: Sequence, target: TypeTag) -> Sequence {
    Sequence::new(source.filter(move |pulled| match pulled {
        Ok(item) => item.type_tag() == target,
        Err(_) => true,
    }))
}

/// Converts every item to the given type, failing on the first item that
/// cannot be converted
pub fn cast(source: Sequence, target: TypeTag) -> Sequence {
    Sequence::new(source.map(move |pulled| {
        let item = pulled?;
        item.cast_to(target).ok_or(QueryError::InvalidCast {
            from: item.type_tag(),
            to: target,
        })
    }))
}
