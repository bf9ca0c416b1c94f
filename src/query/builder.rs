//! Fluent construction of query part lists

use crate::executor::{Output, QueryExecutor, QueryResult};
use crate::value::Item;

use super::part::{Argument, Callable, OperatorKind, QueryPart};
use super::sequence::Sequence;

/// Accumulates query parts in call order.
///
/// ```ignore
/// let output = Query::new()
///     .where_(|x| x.as_f64() > Some(2.0))
///     .order_by(|x| x.clone())
///     .count()
///     .execute(source)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    parts: Vec<QueryPart>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an arbitrary part
    pub fn push(mut self, kind: OperatorKind, arguments: Vec<Argument>) -> Self {
        self.parts.push(QueryPart::new(kind, arguments));
        self
    }

    pub fn parts(&self) -> &[QueryPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<QueryPart> {
        self.parts
    }

    /// Runs the parts against `source` with a default executor
    pub fn execute(&self, source: impl Into<Item>) -> QueryResult<Output> {
        QueryExecutor::default().execute(source.into(), &self.parts)
    }

    pub fn execute_sequence(&self, source: Sequence) -> QueryResult<Output> {
        QueryExecutor::default().execute_sequence(source, &self.parts)
    }

    fn with_function(self, kind: OperatorKind, f: Callable) -> Self {
        self.push(kind, vec![Argument::from(f)])
    }

    fn with_literal(self, kind: OperatorKind, value: impl Into<Item>) -> Self {
        self.push(kind, vec![Argument::literal(value)])
    }

    // Filtering

    pub fn where_<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::Where, Callable::predicate(predicate))
    }

    pub fn of_type(self, type_name: &str) -> Self {
        self.with_literal(OperatorKind::OfType, type_name)
    }

    pub fn cast(self, type_name: &str) -> Self {
        self.with_literal(OperatorKind::Cast, type_name)
    }

    // Projection

    pub fn select<F>(self, selector: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::Select, Callable::unary(selector))
    }

    pub fn select_many<F>(self, selector: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::SelectMany, Callable::unary(selector))
    }

    /// selectMany with a result selector over (outer, inner)
    pub fn select_many_with<F, R>(self, selector: F, result: R) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
        R: Fn(&Item, &Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::SelectMany,
            vec![Argument::unary(selector), Argument::binary(result)],
        )
    }

    // Joins

    pub fn join_with<O, I>(self, inner: impl Into<Item>, outer_key: O, inner_key: I) -> Self
    where
        O: Fn(&Item) -> Item + 'static,
        I: Fn(&Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::JoinWith,
            vec![
                Argument::literal(inner),
                Argument::unary(outer_key),
                Argument::unary(inner_key),
            ],
        )
    }

    pub fn group_join<O, I>(self, inner: impl Into<Item>, outer_key: O, inner_key: I) -> Self
    where
        O: Fn(&Item) -> Item + 'static,
        I: Fn(&Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::GroupJoin,
            vec![
                Argument::literal(inner),
                Argument::unary(outer_key),
                Argument::unary(inner_key),
            ],
        )
    }

    // Partitioning

    pub fn take(self, count: i64) -> Self {
        self.with_literal(OperatorKind::Take, count)
    }

    pub fn skip(self, count: i64) -> Self {
        self.with_literal(OperatorKind::Skip, count)
    }

    pub fn take_while<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::TakeWhile, Callable::predicate(predicate))
    }

    pub fn skip_while<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::SkipWhile, Callable::predicate(predicate))
    }

    // Grouping and dedup

    pub fn group_by<F>(self, key: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::GroupBy, Callable::unary(key))
    }

    /// groupBy with a result selector over (key, members)
    pub fn group_by_with<F, R>(self, key: F, result: R) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
        R: Fn(&Item, &Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::GroupBy,
            vec![Argument::unary(key), Argument::binary(result)],
        )
    }

    pub fn distinct(self) -> Self {
        self.push(OperatorKind::Distinct, Vec::new())
    }

    pub fn distinct_by<F>(self, comparer: F) -> Self
    where
        F: Fn(&Item, &Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::Distinct, Callable::comparer(comparer))
    }

    // Combination

    pub fn concat_with(self, other: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::ConcatWith, other)
    }

    pub fn zip(self, other: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::Zip, other)
    }

    pub fn zip_with<F>(self, other: impl Into<Item>, result: F) -> Self
    where
        F: Fn(&Item, &Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::Zip,
            vec![Argument::literal(other), Argument::binary(result)],
        )
    }

    pub fn union(self, other: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::Union, other)
    }

    pub fn intersect(self, other: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::Intersect, other)
    }

    pub fn except(self, other: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::Except, other)
    }

    pub fn default_if_empty(self, default: Option<Item>) -> Self {
        let arguments = default.map(Argument::Literal).into_iter().collect();
        self.push(OperatorKind::DefaultIfEmpty, arguments)
    }

    pub fn reverse(self) -> Self {
        self.push(OperatorKind::Reverse, Vec::new())
    }

    // Ordering

    pub fn order_by<F>(self, key: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::OrderBy, Callable::unary(key))
    }

    pub fn order_by_descending<F>(self, key: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::OrderByDescending, Callable::unary(key))
    }

    pub fn then_by<F>(self, key: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::ThenBy, Callable::unary(key))
    }

    pub fn then_by_descending<F>(self, key: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::ThenByDescending, Callable::unary(key))
    }

    // Element access

    pub fn first(self) -> Self {
        self.push(OperatorKind::First, Vec::new())
    }

    pub fn first_where<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::First, Callable::predicate(predicate))
    }

    pub fn first_or_default(self) -> Self {
        self.push(OperatorKind::FirstOrDefault, Vec::new())
    }

    pub fn last(self) -> Self {
        self.push(OperatorKind::Last, Vec::new())
    }

    pub fn last_where<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::Last, Callable::predicate(predicate))
    }

    pub fn last_or_default(self) -> Self {
        self.push(OperatorKind::LastOrDefault, Vec::new())
    }

    pub fn single(self) -> Self {
        self.push(OperatorKind::Single, Vec::new())
    }

    pub fn single_where<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::Single, Callable::predicate(predicate))
    }

    pub fn single_or_default(self) -> Self {
        self.push(OperatorKind::SingleOrDefault, Vec::new())
    }

    pub fn element_at(self, index: i64) -> Self {
        self.with_literal(OperatorKind::ElementAt, index)
    }

    pub fn element_at_or_default(self, index: i64) -> Self {
        self.with_literal(OperatorKind::ElementAtOrDefault, index)
    }

    // Quantifiers

    pub fn contains(self, item: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::Contains, item)
    }

    pub fn sequence_equal(self, other: impl Into<Item>) -> Self {
        self.with_literal(OperatorKind::SequenceEqual, other)
    }

    pub fn any(self) -> Self {
        self.push(OperatorKind::Any, Vec::new())
    }

    pub fn any_where<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::Any, Callable::predicate(predicate))
    }

    pub fn all<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::All, Callable::predicate(predicate))
    }

    // Aggregates

    pub fn count(self) -> Self {
        self.push(OperatorKind::Count, Vec::new())
    }

    pub fn count_where<F>(self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        self.with_function(OperatorKind::Count, Callable::predicate(predicate))
    }

    pub fn min(self) -> Self {
        self.push(OperatorKind::Min, Vec::new())
    }

    pub fn min_by<F>(self, selector: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::Min, Callable::unary(selector))
    }

    pub fn max(self) -> Self {
        self.push(OperatorKind::Max, Vec::new())
    }

    pub fn max_by<F>(self, selector: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::Max, Callable::unary(selector))
    }

    pub fn sum(self) -> Self {
        self.push(OperatorKind::Sum, Vec::new())
    }

    pub fn sum_by<F>(self, selector: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::Sum, Callable::unary(selector))
    }

    pub fn average(self) -> Self {
        self.push(OperatorKind::Average, Vec::new())
    }

    pub fn average_by<F>(self, selector: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::Average, Callable::unary(selector))
    }

    /// Folds without a seed; the first element starts the accumulator
    pub fn aggregate<F>(self, folder: F) -> Self
    where
        F: Fn(&Item, &Item) -> Item + 'static,
    {
        self.with_function(OperatorKind::Aggregate, Callable::binary(folder))
    }

    pub fn aggregate_seeded<F>(self, seed: impl Into<Item>, folder: F) -> Self
    where
        F: Fn(&Item, &Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::Aggregate,
            vec![Argument::binary(folder), Argument::literal(seed)],
        )
    }

    /// Folds `projection(x)` for every element, starting from `seed`
    pub fn aggregate_projected<F, P>(self, seed: impl Into<Item>, folder: F, projection: P) -> Self
    where
        F: Fn(&Item, &Item) -> Item + 'static,
        P: Fn(&Item) -> Item + 'static,
    {
        self.push(
            OperatorKind::Aggregate,
            vec![
                Argument::binary(folder),
                Argument::literal(seed),
                Argument::unary(projection),
            ],
        )
    }
}
