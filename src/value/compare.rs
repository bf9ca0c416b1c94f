//! Total ordering over items, used for sorting and min/max.
//!
//! Ordering rules:
//! - null < bool < number < string < array < object
//! - For same types, natural ordering; NaN sorts below every other number
//! - Arrays compare lexicographically, objects are not compared

use std::cmp::Ordering;

use super::item::Item;

/// Compares two items for sorting.
pub fn compare_items(a: &Item, b: &Item) -> Ordering {
    let a_rank = a.type_tag().rank();
    let b_rank = b.type_tag().rank();

    if a_rank != b_rank {
        return a_rank.cmp(&b_rank);
    }

    match (a, b) {
        (Item::Bool(x), Item::Bool(y)) => x.cmp(y),
        (Item::Number(x), Item::Number(y)) => compare_numbers(*x, *y),
        (Item::String(x), Item::String(y)) => x.cmp(y),
        (Item::Array(x), Item::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ordering = compare_items(l, r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => Ordering::Equal,
    }
}

fn compare_numbers(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}
