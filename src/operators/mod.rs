//! Operator library
//!
//! One implementation per operator kind. Non-terminal operators return a
//! lazy `Sequence`; terminal operators consume their input and return a
//! value (or absence).
//!
//! # Equality per operator
//!
//! - joinWith, groupJoin, groupBy: structural
//! - distinct: caller comparer, else loose
//! - union, intersect, except, contains: identity
//! - sequenceEqual: loose

mod aggregate;
mod element;
mod filtering;
mod grouping;
mod join;
mod ordering;
mod partition;
mod projection;
mod quantifier;
mod set;

pub use ordering::{order, ResultSorter, SortDirection, SortKey};

use std::rc::Rc;

use crate::executor::{Output, QueryError, QueryResult};
use crate::query::{OperatorKind, QueryPart, Sequence};
use crate::value::{Equality, Item, TypeTag};

fn type_argument(part: &QueryPart) -> QueryResult<TypeTag> {
    let literal = part.require_literal(0, "type name")?;
    literal.as_str().and_then(TypeTag::parse).ok_or_else(|| {
        QueryError::invalid_argument(part.kind().name(), format!("unknown type {}", literal))
    })
}

fn lazy(sequence: Sequence) -> QueryResult<Output> {
    Ok(Output::Sequence(sequence))
}

fn value(item: impl Into<Item>) -> QueryResult<Output> {
    Ok(Output::Value(item.into()))
}

fn found(item: Option<Item>) -> QueryResult<Output> {
    Ok(Output::from_option(item))
}

/// defaultIfEmpty accepts an absent or null input and treats it as empty
fn default_if_empty(input: Output, part: &QueryPart) -> QueryResult<Output> {
    let source = match input {
        Output::Absent | Output::Value(Item::Null) => Sequence::empty(),
        other => other.into_sequence()?,
    };
    lazy(set::default_if_empty(source, part.literal(0).cloned()))
}

/// Applies one query part to the running value.
///
/// Ordering parts sort by their single key here; the executor fuses runs of
/// them before they reach this point.
pub fn apply(input: Output, part: &QueryPart) -> QueryResult<Output> {
    let kind = part.kind();
    let name = kind.name();

    if kind == OperatorKind::DefaultIfEmpty {
        return default_if_empty(input, part);
    }

    let source = input.into_sequence()?;

    match kind {
        OperatorKind::Where => lazy(filtering::filter(
            source,
            part.require_function(0, "predicate")?.clone(),
        )),
        OperatorKind::OfType => lazy(filtering::of_type(source, type_argument(part)?)),
        OperatorKind::Cast => lazy(filtering::cast(source, type_argument(part)?)),
        OperatorKind::Select => lazy(projection::select(
            source,
            part.require_function(0, "selector")?.clone(),
        )),
        OperatorKind::SelectMany => lazy(projection::select_many(
            source,
            part.require_function(0, "selector")?.clone(),
            part.function(1).cloned(),
        )),
        OperatorKind::JoinWith => lazy(join::join_with(
            source,
            part.require_items(0, "inner sequence")?,
            part.require_function(1, "outer key selector")?.clone(),
            part.require_function(2, "inner key selector")?.clone(),
            part.function(3).cloned(),
        )),
        OperatorKind::GroupJoin => lazy(join::group_join(
            source,
            part.require_items(0, "inner sequence")?,
            part.require_function(1, "outer key selector")?.clone(),
            part.require_function(2, "inner key selector")?.clone(),
            part.function(3).cloned(),
        )),
        OperatorKind::Take => lazy(partition::take(source, part.require_integer(0, "count")?)),
        OperatorKind::Skip => lazy(partition::skip(source, part.require_integer(0, "count")?)),
        OperatorKind::TakeWhile => lazy(partition::take_while(
            source,
            part.require_function(0, "predicate")?.clone(),
        )),
        OperatorKind::SkipWhile => lazy(partition::skip_while(
            source,
            part.require_function(0, "predicate")?.clone(),
        )),
        OperatorKind::GroupBy => lazy(grouping::group_by(
            source,
            part.require_function(0, "key selector")?.clone(),
            part.function(1).cloned(),
        )),
        OperatorKind::Distinct => {
            let equality = match part.function(0) {
                Some(comparer) => {
                    let comparer = comparer.clone();
                    Equality::Custom(Rc::new(move |a: &Item, b: &Item| comparer.test2(a, b)))
                }
                None => Equality::Loose,
            };
            lazy(grouping::distinct(source, equality))
        }
        OperatorKind::ConcatWith => lazy(set::concat_with(
            source,
            part.require_items(0, "other sequence")?,
        )),
        OperatorKind::Zip => lazy(set::zip(
            source,
            part.require_items(0, "other sequence")?,
            part.function(1).cloned(),
        )),
        OperatorKind::Union => lazy(set::union(source, part.require_items(0, "other sequence")?)),
        OperatorKind::Intersect => lazy(set::intersect(
            source,
            part.require_items(0, "other sequence")?,
        )),
        OperatorKind::Except => lazy(set::except(source, part.require_items(0, "other sequence")?)),
        OperatorKind::DefaultIfEmpty => default_if_empty(Output::Sequence(source), part),
        OperatorKind::Reverse => lazy(set::reverse(source)),
        OperatorKind::OrderBy
        | OperatorKind::OrderByDescending
        | OperatorKind::ThenBy
        | OperatorKind::ThenByDescending => {
            lazy(ordering::order(source, vec![SortKey::from_part(part)?]))
        }
        OperatorKind::First | OperatorKind::FirstOrDefault => found(element::first(
            name,
            source,
            part.function(0),
            kind == OperatorKind::FirstOrDefault,
        )?),
        OperatorKind::Last | OperatorKind::LastOrDefault => found(element::last(
            name,
            source,
            part.function(0),
            kind == OperatorKind::LastOrDefault,
        )?),
        OperatorKind::Single | OperatorKind::SingleOrDefault => found(element::single(
            name,
            source,
            part.function(0),
            kind == OperatorKind::SingleOrDefault,
        )?),
        OperatorKind::ElementAt | OperatorKind::ElementAtOrDefault => {
            found(element::element_at(
                source,
                part.require_integer(0, "index")?,
                kind == OperatorKind::ElementAtOrDefault,
            )?)
        }
        OperatorKind::Contains => value(quantifier::contains(
            source,
            part.require_literal(0, "item")?,
        )?),
        OperatorKind::SequenceEqual => value(quantifier::sequence_equal(
            source,
            &part.require_items(0, "other sequence")?,
        )?),
        OperatorKind::Any => value(quantifier::any(source, part.function(0))?),
        OperatorKind::All => value(quantifier::all(
            source,
            part.require_function(0, "predicate")?,
        )?),
        OperatorKind::Count => value(aggregate::count(source, part.function(0))?),
        OperatorKind::Min => value(aggregate::min(source, part.function(0))?),
        OperatorKind::Max => value(aggregate::max(source, part.function(0))?),
        OperatorKind::Sum => value(aggregate::sum(source, part.function(0))?),
        OperatorKind::Average => value(aggregate::average(source, part.function(0))?),
        OperatorKind::Aggregate => value(aggregate::aggregate(
            source,
            part.require_function(0, "folder")?,
            part.literal(1).cloned(),
            part.function(2),
        )?),
    }
}
