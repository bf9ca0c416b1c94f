//! Join operators: joinWith, groupJoin
//!
//! Keys are compared structurally so composite keys match by content.
//! Inner keys are recomputed for every outer item.

use crate::query::{Callable, Sequence};
use crate::value::{structurally_equal, Item};

/// Inner join of the source (outer) against `inner`
pub fn join_with(
    outer: Sequence,
    inner: Vec<Item>,
    outer_key: Callable,
    inner_key: Callable,
    result_selector: Option<Callable>,
) -> Sequence {
    Sequence::new(outer.flat_map(move |pulled| {
        let rows: Vec<_> = match pulled {
            Ok(left) => {
                let key = outer_key.call(&left);
                inner
                    .iter()
                    .filter(|right| structurally_equal(&key, &inner_key.call(right)))
                    .map(|right| {
                        Ok(match &result_selector {
                            Some(result) => result.call2(&left, right),
                            None => Item::array(vec![left.clone(), right.clone()]),
                        })
                    })
                    .collect()
            }
            Err(e) => vec![Err(e)],
        };
        rows
    }))
}

/// Grouped left join: every outer item is paired with the (possibly empty)
/// array of matching inner items
pub fn group_join(
    outer: Sequence,
    inner: Vec<Item>,
    outer_key: Callable,
    inner_key: Callable,
    result_selector: Option<Callable>,
) -> Sequence {
    Sequence::new(outer.map(move |pulled| {
        let left = pulled?;
        let key = outer_key.call(&left);
        let matches = Item::array(
            inner
                .iter()
                .filter(|right| structurally_equal(&key, &inner_key.call(right)))
                .cloned()
                .collect(),
        );
        Ok(match &result_selector {
            Some(result) => result.call2(&left, &matches),
            None => Item::object([("outer", left), ("inner", matches)]),
        })
    }))
}
