//! Combination operators: concatWith, zip, union, intersect, except,
//! defaultIfEmpty, reverse
//!
//! Set algebra uses identity membership. Callers wanting structural set
//! semantics should project to primitive keys first.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::query::{Callable, Sequence};
use crate::value::{IdentityKey, Item};

/// Source items followed by `other`
pub fn concat_with(source: Sequence, other: Vec<Item>) -> Sequence {
    Sequence::new(source.chain(other.into_iter().map(Ok)))
}

/// Pairs items positionally, stopping at the shorter input
pub fn zip(source: Sequence, other: Vec<Item>, result_selector: Option<Callable>) -> Sequence {
    // Source is never pulled past the end of `other`.
    Sequence::new(other.into_iter().zip(source).map(move |(right, pulled)| {
        let left = pulled?;
        Ok(match &result_selector {
            Some(result) => result.call2(&left, &right),
            None => Item::array(vec![left, right]),
        })
    }))
}

/// Distinct items of the source, then of `other`, in first-occurrence order
pub fn union(source: Sequence, other: Vec<Item>) -> Sequence {
    let mut yielded = HashSet::new();
    Sequence::new(
        source
            .chain(other.into_iter().map(Ok))
            .filter(move |pulled| match pulled {
                Ok(item) => yielded.insert(IdentityKey::new(item)),
                Err(_) => true,
            }),
    )
}

/// Distinct source items that also occur in `other`
pub fn intersect(source: Sequence, other: Vec<Item>) -> Sequence {
    let members: HashSet<IdentityKey> = other.iter().map(IdentityKey::new).collect();
    let mut yielded = HashSet::new();
    Sequence::new(source.filter(move |pulled| match pulled {
        Ok(item) => {
            let key = IdentityKey::new(item);
            members.contains(&key) && yielded.insert(key)
        }
        Err(_) => true,
    }))
}

/// Distinct source items that do not occur in `other`
pub fn except(source: Sequence, other: Vec<Item>) -> Sequence {
    let mut excluded: HashSet<IdentityKey> = other.iter().map(IdentityKey::new).collect();
    Sequence::new(source.filter(move |pulled| match pulled {
        Ok(item) => excluded.insert(IdentityKey::new(item)),
        Err(_) => true,
    }))
}

/// The source unchanged, or `default` once if the source turns out empty
pub fn default_if_empty(source: Sequence, default: Option<Item>) -> Sequence {
    let Some(default) = default else {
        return source;
    };
    let produced = Rc::new(Cell::new(false));
    let marker = Rc::clone(&produced);
    let fallback = std::iter::once_with(move || (!marker.get()).then(|| Ok(default))).flatten();
    Sequence::new(source.inspect(move |_| produced.set(true)).chain(fallback))
}

/// Items in reverse order, from the last index down to the first
pub fn reverse(source: Sequence) -> Sequence {
    Sequence::deferred(move || {
        let items = source.collect_items()?;
        Ok((0..items.len()).rev().map(|i| items[i].clone()).collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq(value: serde_json::Value) -> Sequence {
        Sequence::from_array(&Item::from(value)).unwrap()
    }

    fn items(value: serde_json::Value) -> Vec<Item> {
        Item::from(value).as_array().unwrap().to_vec()
    }

    #[test]
    fn test_concat_with() {
        let all = concat_with(seq(json!([1, 2])), items(json!([3])))
            .collect_items()
            .unwrap();
        assert_eq!(all, items(json!([1, 2, 3])));
    }

    #[test]
    fn test_zip_truncates() {
        let sum = Callable::binary(|a, b| {
            Item::from(a.as_f64().unwrap_or(0.0) + b.as_f64().unwrap_or(0.0))
        });
        let zipped = zip(seq(json!([1, 2, 3])), items(json!([10, 20])), Some(sum))
            .collect_items()
            .unwrap();
        assert_eq!(zipped, items(json!([11, 22])));

        let pairs = zip(seq(json!(["a"])), items(json!([1, 2])), None)
            .collect_items()
            .unwrap();
        assert_eq!(pairs, items(json!([["a", 1]])));
    }

    #[test]
    fn test_zip_stops_pulling_at_shorter_other() {
        let pulls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulls);
        let source = Sequence::new((0..).map(move |n: i64| {
            counter.set(counter.get() + 1);
            Ok(Item::from(n))
        }));
        let pairs = zip(source, items(json!(["a", "b"])), None)
            .collect_items()
            .unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pulls.get(), 2);
    }

    #[test]
    fn test_union_intersect_except() {
        let unioned = union(seq(json!([1, 2, 2, 3])), items(json!([3, 4, 1])))
            .collect_items()
            .unwrap();
        assert_eq!(unioned, items(json!([1, 2, 3, 4])));

        let common = intersect(seq(json!([1, 2, 2, 3])), items(json!([2, 3, 5])))
            .collect_items()
            .unwrap();
        assert_eq!(common, items(json!([2, 3])));

        let rest = except(seq(json!([1, 2, 1, 3])), items(json!([2])))
            .collect_items()
            .unwrap();
        assert_eq!(rest, items(json!([1, 3])));
    }

    #[test]
    fn test_set_algebra_uses_identity() {
        let shared = Item::from(json!({"id": 1}));
        let lookalike = Item::from(json!({"id": 1}));
        let source = Sequence::from_items(vec![shared.clone(), lookalike]);

        let common = intersect(source, vec![shared]).collect_items().unwrap();
        assert_eq!(common.len(), 1);
    }

    #[test]
    fn test_default_if_empty() {
        let filled = default_if_empty(Sequence::empty(), Some(Item::from(0)))
            .collect_items()
            .unwrap();
        assert_eq!(filled, vec![Item::from(0)]);

        let untouched = default_if_empty(seq(json!([5])), Some(Item::from(0)))
            .collect_items()
            .unwrap();
        assert_eq!(untouched, vec![Item::from(5)]);

        assert!(default_if_empty(Sequence::empty(), None)
            .collect_items()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_reverse() {
        let reversed = reverse(seq(json!([1, 2, 3]))).collect_items().unwrap();
        assert_eq!(reversed, items(json!([3, 2, 1])));
        assert!(reverse(Sequence::empty()).collect_items().unwrap().is_empty());
    }
}
