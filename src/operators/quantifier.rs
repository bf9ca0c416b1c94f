//! Quantifiers and membership: contains, sequenceEqual, any, all

use crate::executor::QueryResult;
use crate::query::{Callable, Sequence};
use crate::value::{identical, loosely_equal, Item};

/// Identity membership. Stops pulling at the first hit.
pub fn contains(source: Sequence, needle: &Item) -> QueryResult<bool> {
    for pulled in source {
        if identical(&pulled?, needle) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Equal length and loosely equal elements at every position
pub fn sequence_equal(source: Sequence, other: &[Item]) -> QueryResult<bool> {
    let mut expected = other.iter();
    for pulled in source {
        let item = pulled?;
        match expected.next() {
            Some(right) if loosely_equal(&item, right) => {}
            _ => return Ok(false),
        }
    }
    Ok(expected.next().is_none())
}

/// Without a predicate: true if the source has any item
pub fn any(source: Sequence, predicate: Option<&Callable>) -> QueryResult<bool> {
    for pulled in source {
        let item = pulled?;
        if predicate.map_or(true, |p| p.test(&item)) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// True if every item satisfies the predicate (vacuously true when empty)
pub fn all(source: Sequence, predicate: &Callable) -> QueryResult<bool> {
    for pulled in source {
        if !predicate.test(&pulled?) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq(value: serde_json::Value) -> Sequence {
        Sequence::from_array(&Item::from(value)).unwrap()
    }

    fn positive() -> Callable {
        Callable::predicate(|x| x.as_f64().map_or(false, |n| n > 0.0))
    }

    #[test]
    fn test_contains_identity() {
        assert!(contains(seq(json!([1, 2])), &Item::from(2)).unwrap());
        assert!(!contains(seq(json!([1, 2])), &Item::from("2")).unwrap());

        let obj = Item::from(json!({"a": 1}));
        let source = Sequence::from_items(vec![obj.clone()]);
        assert!(contains(source, &obj).unwrap());
        assert!(!contains(seq(json!([{"a": 1}])), &obj).unwrap());
    }

    #[test]
    fn test_sequence_equal() {
        let other = vec![Item::from(1), Item::from("2")];
        assert!(sequence_equal(seq(json!([1, 2])), &other).unwrap());
        assert!(!sequence_equal(seq(json!([1])), &other).unwrap());
        assert!(!sequence_equal(seq(json!([1, 2, 3])), &other).unwrap());
        assert!(sequence_equal(seq(json!([])), &[]).unwrap());
    }

    #[test]
    fn test_any_all() {
        assert!(any(seq(json!([0])), None).unwrap());
        assert!(!any(seq(json!([])), None).unwrap());
        assert!(!any(seq(json!([-1, 0])), Some(&positive())).unwrap());
        assert!(all(seq(json!([1, 2])), &positive()).unwrap());
        assert!(!all(seq(json!([1, -2])), &positive()).unwrap());
        assert!(all(seq(json!([])), &positive()).unwrap());
    }
}
