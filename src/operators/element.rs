//! Element access: first, last, single, elementAt and their OrDefault forms
//!
//! `None` is the "no value" result. Only the OrDefault forms produce it; the
//! plain forms fail with `EmptySequence`, `NoMatch` or `IndexOutOfRange`.

use crate::executor::{QueryError, QueryResult};
use crate::query::{Callable, Sequence};
use crate::value::Item;

fn absence(operator: &'static str, seen_any: bool, or_default: bool) -> QueryResult<Option<Item>> {
    if or_default {
        Ok(None)
    } else if seen_any {
        Err(QueryError::NoMatch { operator })
    } else {
        Err(QueryError::EmptySequence { operator })
    }
}

fn accepts(predicate: Option<&Callable>, item: &Item) -> bool {
    predicate.map_or(true, |p| p.test(item))
}

/// First matching item. Stops pulling at the match.
pub fn first(
    operator: &'static str,
    source: Sequence,
    predicate: Option<&Callable>,
    or_default: bool,
) -> QueryResult<Option<Item>> {
    let mut seen_any = false;
    for pulled in source {
        let item = pulled?;
        seen_any = true;
        if accepts(predicate, &item) {
            return Ok(Some(item));
        }
    }
    absence(operator, seen_any, or_default)
}

/// Last matching item
pub fn last(
    operator: &'static str,
    source: Sequence,
    predicate: Option<&Callable>,
    or_default: bool,
) -> QueryResult<Option<Item>> {
    let mut seen_any = false;
    let mut found = None;
    for pulled in source {
        let item = pulled?;
        seen_any = true;
        if accepts(predicate, &item) {
            found = Some(item);
        }
    }
    match found {
        Some(item) => Ok(Some(item)),
        None => absence(operator, seen_any, or_default),
    }
}

/// The only matching item. A second match fails with `MultipleMatches`
/// regardless of `or_default`.
pub fn single(
    operator: &'static str,
    source: Sequence,
    predicate: Option<&Callable>,
    or_default: bool,
) -> QueryResult<Option<Item>> {
    let mut seen_any = false;
    let mut found = None;
    for pulled in source {
        let item = pulled?;
        seen_any = true;
        if accepts(predicate, &item) {
            if found.is_some() {
                return Err(QueryError::MultipleMatches { operator });
            }
            found = Some(item);
        }
    }
    match found {
        Some(item) => Ok(Some(item)),
        None => absence(operator, seen_any, or_default),
    }
}

/// Item at a zero-based position. Valid positions are `0..len`.
pub fn element_at(source: Sequence, index: i64, or_default: bool) -> QueryResult<Option<Item>> {
    let mut length = 0usize;
    if index >= 0 {
        for pulled in source {
            let item = pulled?;
            if length as i64 == index {
                return Ok(Some(item));
            }
            length += 1;
        }
    }
    if or_default {
        Ok(None)
    } else {
        Err(QueryError::IndexOutOfRange { index, length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq(value: serde_json::Value) -> Sequence {
        Sequence::from_array(&Item::from(value)).unwrap()
    }

    fn above(limit: i64) -> Callable {
        Callable::predicate(move |x| x.as_i64().map_or(false, |n| n > limit))
    }

    #[test]
    fn test_first() {
        assert_eq!(first("first", seq(json!([4, 5])), None, false), Ok(Some(Item::from(4))));
        assert_eq!(
            first("first", seq(json!([])), None, false),
            Err(QueryError::EmptySequence { operator: "first" })
        );
        assert_eq!(
            first("first", seq(json!([1])), Some(&above(3)), false),
            Err(QueryError::NoMatch { operator: "first" })
        );
        assert_eq!(first("firstOrDefault", seq(json!([])), None, true), Ok(None));
    }

    #[test]
    fn test_last() {
        assert_eq!(
            last("last", seq(json!([4, 5, 1])), Some(&above(3)), false),
            Ok(Some(Item::from(5)))
        );
        assert_eq!(last("lastOrDefault", seq(json!([1])), Some(&above(3)), true), Ok(None));
    }

    #[test]
    fn test_single() {
        assert_eq!(
            single("single", seq(json!([1, 2])), Some(&above(0)), false),
            Err(QueryError::MultipleMatches { operator: "single" })
        );
        assert_eq!(
            single("single", seq(json!([1, 2])), Some(&above(1)), false),
            Ok(Some(Item::from(2)))
        );
        assert_eq!(
            single("singleOrDefault", seq(json!([1, 2])), Some(&above(5)), true),
            Ok(None)
        );
        assert_eq!(
            single("singleOrDefault", seq(json!([1, 2])), None, true),
            Err(QueryError::MultipleMatches { operator: "singleOrDefault" })
        );
    }

    #[test]
    fn test_element_at_bounds() {
        assert_eq!(element_at(seq(json!([1, 2, 3])), 0, false), Ok(Some(Item::from(1))));
        assert_eq!(element_at(seq(json!([1, 2, 3])), 2, false), Ok(Some(Item::from(3))));
        assert_eq!(
            element_at(seq(json!([1, 2, 3])), 3, false),
            Err(QueryError::IndexOutOfRange { index: 3, length: 3 })
        );
        assert_eq!(
            element_at(seq(json!([1, 2, 3])), 5, false),
            Err(QueryError::IndexOutOfRange { index: 5, length: 3 })
        );
        assert!(element_at(seq(json!([1])), -1, false).is_err());
        assert_eq!(element_at(seq(json!([1, 2, 3])), 3, true), Ok(None));
    }
}
