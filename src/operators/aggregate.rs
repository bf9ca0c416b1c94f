//! Aggregates: count, min, max, sum, average, aggregate

use std::cmp::Ordering;

use crate::executor::{QueryError, QueryResult};
use crate::query::{Callable, Sequence};
use crate::value::{compare_items, Item, TypeTag};

fn project(selector: Option<&Callable>, item: Item) -> Item {
    match selector {
        Some(selector) => selector.call(&item),
        None => item,
    }
}

fn numeric(item: &Item) -> QueryResult<f64> {
    item.to_number().ok_or(QueryError::InvalidCast {
        from: item.type_tag(),
        to: TypeTag::Number,
    })
}

/// Number of items, optionally only those matching the predicate
pub fn count(source: Sequence, predicate: Option<&Callable>) -> QueryResult<usize> {
    let mut total = 0;
    for pulled in source {
        let item = pulled?;
        if predicate.map_or(true, |p| p.test(&item)) {
            total += 1;
        }
    }
    Ok(total)
}

/// Keeps the (projected) value `wanted` ranks first under the item ordering
fn extreme(
    operator: &'static str,
    source: Sequence,
    selector: Option<&Callable>,
    wanted: Ordering,
) -> QueryResult<Item> {
    let mut best: Option<Item> = None;
    for pulled in source {
        let value = project(selector, pulled?);
        best = match best {
            Some(current) if compare_items(&value, &current) != wanted => Some(current),
            _ => Some(value),
        };
    }
    best.ok_or(QueryError::EmptySequence { operator })
}

pub fn min(source: Sequence, selector: Option<&Callable>) -> QueryResult<Item> {
    extreme("min", source, selector, Ordering::Less)
}

pub fn max(source: Sequence, selector: Option<&Callable>) -> QueryResult<Item> {
    extreme("max", source, selector, Ordering::Greater)
}

/// Numeric sum; 0 for an empty source
pub fn sum(source: Sequence, selector: Option<&Callable>) -> QueryResult<f64> {
    let mut total = 0.0;
    for pulled in source {
        total += numeric(&project(selector, pulled?))?;
    }
    Ok(total)
}

/// Arithmetic mean; 0 for an empty source rather than an error
pub fn average(source: Sequence, selector: Option<&Callable>) -> QueryResult<f64> {
    let mut total = 0.0;
    let mut n = 0usize;
    for pulled in source {
        total += numeric(&project(selector, pulled?))?;
        n += 1;
    }
    Ok(if n == 0 { 0.0 } else { total / n as f64 })
}

/// Left fold. Each item is projected first when a projection is given.
/// Without a seed the first projected item seeds the fold.
pub fn aggregate(
    source: Sequence,
    folder: &Callable,
    seed: Option<Item>,
    projection: Option<&Callable>,
) -> QueryResult<Item> {
    let mut accumulator = seed;
    for pulled in source {
        let value = project(projection, pulled?);
        accumulator = Some(match accumulator {
            Some(acc) => folder.call2(&acc, &value),
            None => value,
        });
    }
    accumulator.ok_or(QueryError::EmptySequence {
        operator: "aggregate",
    })
}
