//! Multi-key ordering
//!
//! A fused run of orderBy/thenBy parts sorts with a single comparator.
//! Sort is stable and deterministic.

use std::cmp::Ordering;

use crate::executor::QueryResult;
use crate::query::{Callable, QueryPart, Sequence};
use crate::value::{compare_items, Item};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One key of a multi-key sort
#[derive(Debug, Clone)]
pub struct SortKey {
    /// Key selector
    pub selector: Callable,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(selector: Callable) -> Self {
        Self {
            selector,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(selector: Callable) -> Self {
        Self {
            selector,
            direction: SortDirection::Desc,
        }
    }

    /// Reads the key selector and direction of an ordering part
    pub fn from_part(part: &QueryPart) -> QueryResult<Self> {
        let selector = part.require_function(0, "key selector")?.clone();
        Ok(if part.kind().is_descending() {
            Self::desc(selector)
        } else {
            Self::asc(selector)
        })
    }
}

/// Sorts items by a fused list of keys
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts in place. Key selectors are evaluated for every comparison.
    pub fn sort(items: &mut [Item], keys: &[SortKey]) {
        items.sort_by(|a, b| Self::compare(a, b, keys));
    }

    fn compare(a: &Item, b: &Item, keys: &[SortKey]) -> Ordering {
        for key in keys {
            let a_key = key.selector.call(a);
            let b_key = key.selector.call(b);

            let ordering = compare_items(&a_key, &b_key);
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Materializes the source on first pull and sorts it by `keys`
pub fn order(source: Sequence, keys: Vec<SortKey>) -> Sequence {
    Sequence::deferred(move || {
        let mut items = source.collect_items()?;
        ResultSorter::sort(&mut items, &keys);
        Ok(items)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &'static str) -> Callable {
        Callable::unary(move |x| x.get(name).cloned().unwrap_or(Item::Null))
    }

    fn make_doc(id: &str, age: i64) -> Item {
        Item::from(json!({"id": id, "age": age}))
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items
            .iter()
            .map(|i| i.get("id").and_then(Item::as_str).unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_sort_ascending() {
        let mut docs = vec![make_doc("c", 30), make_doc("a", 20), make_doc("b", 25)];
        ResultSorter::sort(&mut docs, &[SortKey::asc(field("age"))]);
        assert_eq!(ids(&docs), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_descending() {
        let mut docs = vec![make_doc("c", 30), make_doc("a", 20), make_doc("b", 25)];
        ResultSorter::sort(&mut docs, &[SortKey::desc(field("age"))]);
        assert_eq!(ids(&docs), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_stable() {
        // Same age, source order preserved
        let mut docs = vec![make_doc("a", 25), make_doc("b", 25), make_doc("c", 25)];
        ResultSorter::sort(&mut docs, &[SortKey::asc(field("age"))]);
        assert_eq!(ids(&docs), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_directions() {
        let mut docs = vec![
            make_doc("x", 2),
            make_doc("y", 1),
            make_doc("z", 2),
            make_doc("w", 1),
        ];
        ResultSorter::sort(
            &mut docs,
            &[SortKey::asc(field("age")), SortKey::desc(field("id"))],
        );
        assert_eq!(ids(&docs), vec!["y", "w", "z", "x"]);
    }

    #[test]
    fn test_sort_with_nan_keys() {
        let mut items: Vec<Item> = (0..60)
            .map(|i| {
                if i % 3 == 0 {
                    Item::from("nan")
                } else {
                    Item::from(((i * 37) % 23) as i64)
                }
            })
            .collect();
        let numeric = Callable::unary(|x| Item::Number(x.to_number().unwrap_or(f64::NAN)));
        ResultSorter::sort(&mut items, &[SortKey::asc(numeric)]);

        assert!(items[..20].iter().all(|i| i.as_str() == Some("nan")));
        let rest: Vec<f64> = items[20..].iter().filter_map(Item::as_f64).collect();
        assert_eq!(rest.len(), 40);
        assert!(rest.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_order_is_deferred() {
        let sorted = order(
            Sequence::from_items(vec![make_doc("b", 2), make_doc("a", 1)]),
            vec![SortKey::asc(field("age"))],
        );
        assert!(!sorted.is_exhausted());
        assert_eq!(ids(&sorted.collect_items().unwrap()), vec!["a", "b"]);
    }
}
