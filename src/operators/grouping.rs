//! Grouping and dedup: groupBy, distinct

use crate::executor::QueryResult;
use crate::query::{Callable, Sequence};
use crate::value::{structurally_equal, Equality, Item};

/// A key and the items that produced it, in first-occurrence order
struct Group {
    key: Item,
    items: Vec<Item>,
}

impl Group {
    fn into_item(self, value_selector: Option<&Callable>) -> Item {
        let items = Item::array(self.items);
        match value_selector {
            Some(selector) => selector.call2(&self.key, &items),
            None => Item::object([("key", self.key), ("items", items)]),
        }
    }
}

/// Partitions the whole source by structurally equal keys
fn partition(source: Sequence, key_selector: &Callable) -> QueryResult<Vec<Group>> {
    let mut groups: Vec<Group> = Vec::new();
    for pulled in source {
        let item = pulled?;
        let key = key_selector.call(&item);
        match groups.iter_mut().find(|g| structurally_equal(&g.key, &key)) {
            Some(group) => group.items.push(item),
            None => groups.push(Group {
                key,
                items: vec![item],
            }),
        }
    }
    Ok(groups)
}

/// Groups items by key. Grouping happens on the first pull; each group is
/// handed to the value selector as it is emitted.
pub fn group_by(
    source: Sequence,
    key_selector: Callable,
    value_selector: Option<Callable>,
) -> Sequence {
    let grouped = std::iter::once_with(move || partition(source, &key_selector));
    Sequence::new(grouped.flat_map(move |result| {
        let selector = value_selector.clone();
        let emitted: Box<dyn Iterator<Item = QueryResult<Item>>> = match result {
            Ok(groups) => Box::new(
                groups
                    .into_iter()
                    .map(move |group| Ok(group.into_item(selector.as_ref()))),
            ),
            Err(e) => Box::new(std::iter::once(Err(e))),
        };
        emitted
    }))
}

/// Yields an item only if no earlier yielded item equals it (O(n²))
pub fn distinct(source: Sequence, equality: Equality) -> Sequence {
    let mut seen: Vec<Item> = Vec::new();
    Sequence::new(source.filter(move |pulled| {
        let Ok(item) = pulled else {
            return true;
        };
        if seen.iter().any(|earlier| equality.matches(earlier, item)) {
            return false;
        }
        seen.push(item.clone());
        true
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::rc::Rc;

    fn seq(value: serde_json::Value) -> Sequence {
        Sequence::from_array(&Item::from(value)).unwrap()
    }

    fn parity() -> Callable {
        Callable::unary(|x| Item::from(x.as_i64().unwrap_or(0) % 2))
    }

    #[test]
    fn test_group_by_first_seen_key_order() {
        let key_only = Callable::binary(|key, _| key.clone());
        let keys = group_by(seq(json!([1, 2, 1, 3])), parity(), Some(key_only))
            .collect_items()
            .unwrap();
        assert_eq!(keys, vec![Item::from(1), Item::from(0)]);
    }

    #[test]
    fn test_group_by_default_shape() {
        let groups = group_by(seq(json!([1, 2, 1, 3])), parity(), None)
            .collect_items()
            .unwrap();
        assert_eq!(
            groups,
            vec![
                Item::from(json!({"key": 1, "items": [1, 1, 3]})),
                Item::from(json!({"key": 0, "items": [2]})),
            ]
        );
    }

    #[test]
    fn test_group_by_structural_keys() {
        let loc = Callable::unary(|x| x.get("loc").cloned().unwrap_or(Item::Null));
        let size = Callable::binary(|_, items| {
            Item::from(items.as_array().map_or(0, <[Item]>::len))
        });
        let sizes = group_by(
            seq(json!([
                {"loc": {"c": "a"}}, {"loc": {"c": "b"}}, {"loc": {"c": "a"}}
            ])),
            loc,
            Some(size),
        )
        .collect_items()
        .unwrap();
        assert_eq!(sizes, vec![Item::from(2), Item::from(1)]);
    }

    #[test]
    fn test_distinct_loose_equality() {
        let items = distinct(seq(json!([1, "1", 2, 1, true])), Equality::Loose)
            .collect_items()
            .unwrap();
        assert_eq!(items, vec![Item::from(1), Item::from(2)]);
    }

    #[test]
    fn test_distinct_objects_by_reference() {
        let items = distinct(seq(json!([{"a": 1}, {"a": 1}])), Equality::Loose)
            .collect_items()
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_distinct_custom_comparer() {
        let by_id = Equality::Custom(Rc::new(|a: &Item, b: &Item| a.get("id") == b.get("id")));
        let items = distinct(seq(json!([{"id": 1}, {"id": 2}, {"id": 1}])), by_id)
            .collect_items()
            .unwrap();
        assert_eq!(items.len(), 2);
    }
}
