//! Query parts: one operator application with its arguments

use std::fmt;
use std::rc::Rc;

use crate::executor::{QueryError, QueryResult};
use crate::value::Item;

/// Every operator the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // Filtering
    Where,
    OfType,
    Cast,

    // Projection
    Select,
    SelectMany,

    // Joins
    JoinWith,
    GroupJoin,

    // Partitioning
    Take,
    Skip,
    TakeWhile,
    SkipWhile,

    // Grouping and dedup
    GroupBy,
    Distinct,

    // Combination
    ConcatWith,
    Zip,
    Union,
    Intersect,
    Except,
    DefaultIfEmpty,
    Reverse,

    // Ordering
    OrderBy,
    OrderByDescending,
    ThenBy,
    ThenByDescending,

    // Element access
    First,
    FirstOrDefault,
    Last,
    LastOrDefault,
    Single,
    SingleOrDefault,
    ElementAt,
    ElementAtOrDefault,

    // Quantifiers
    Contains,
    SequenceEqual,
    Any,
    All,

    // Aggregates
    Count,
    Min,
    Max,
    Sum,
    Average,
    Aggregate,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 42] = [
        OperatorKind::Where,
        OperatorKind::OfType,
        OperatorKind::Cast,
        OperatorKind::Select,
        OperatorKind::SelectMany,
        OperatorKind::JoinWith,
        OperatorKind::GroupJoin,
        OperatorKind::Take,
        OperatorKind::Skip,
        OperatorKind::TakeWhile,
        OperatorKind::SkipWhile,
        OperatorKind::GroupBy,
        OperatorKind::Distinct,
        OperatorKind::ConcatWith,
        OperatorKind::Zip,
        OperatorKind::Union,
        OperatorKind::Intersect,
        OperatorKind::Except,
        OperatorKind::DefaultIfEmpty,
        OperatorKind::Reverse,
        OperatorKind::OrderBy,
        OperatorKind::OrderByDescending,
        OperatorKind::ThenBy,
        OperatorKind::ThenByDescending,
        OperatorKind::First,
        OperatorKind::FirstOrDefault,
        OperatorKind::Last,
        OperatorKind::LastOrDefault,
        OperatorKind::Single,
        OperatorKind::SingleOrDefault,
        OperatorKind::ElementAt,
        OperatorKind::ElementAtOrDefault,
        OperatorKind::Contains,
        OperatorKind::SequenceEqual,
        OperatorKind::Any,
        OperatorKind::All,
        OperatorKind::Count,
        OperatorKind::Min,
        OperatorKind::Max,
        OperatorKind::Sum,
        OperatorKind::Average,
        OperatorKind::Aggregate,
    ];

    /// Returns the operator name
    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::Where => "where",
            OperatorKind::OfType => "ofType",
            OperatorKind::Cast => "cast",
            OperatorKind::Select => "select",
            OperatorKind::SelectMany => "selectMany",
            OperatorKind::JoinWith => "joinWith",
            OperatorKind::GroupJoin => "groupJoin",
            OperatorKind::Take => "take",
            OperatorKind::Skip => "skip",
            OperatorKind::TakeWhile => "takeWhile",
            OperatorKind::SkipWhile => "skipWhile",
            OperatorKind::GroupBy => "groupBy",
            OperatorKind::Distinct => "distinct",
            OperatorKind::ConcatWith => "concatWith",
            OperatorKind::Zip => "zip",
            OperatorKind::Union => "union",
            OperatorKind::Intersect => "intersect",
            OperatorKind::Except => "except",
            OperatorKind::DefaultIfEmpty => "defaultIfEmpty",
            OperatorKind::Reverse => "reverse",
            OperatorKind::OrderBy => "orderBy",
            OperatorKind::OrderByDescending => "orderByDescending",
            OperatorKind::ThenBy => "thenBy",
            OperatorKind::ThenByDescending => "thenByDescending",
            OperatorKind::First => "first",
            OperatorKind::FirstOrDefault => "firstOrDefault",
            OperatorKind::Last => "last",
            OperatorKind::LastOrDefault => "lastOrDefault",
            OperatorKind::Single => "single",
            OperatorKind::SingleOrDefault => "singleOrDefault",
            OperatorKind::ElementAt => "elementAt",
            OperatorKind::ElementAtOrDefault => "elementAtOrDefault",
            OperatorKind::Contains => "contains",
            OperatorKind::SequenceEqual => "sequenceEqual",
            OperatorKind::Any => "any",
            OperatorKind::All => "all",
            OperatorKind::Count => "count",
            OperatorKind::Min => "min",
            OperatorKind::Max => "max",
            OperatorKind::Sum => "sum",
            OperatorKind::Average => "average",
            OperatorKind::Aggregate => "aggregate",
        }
    }

    /// Looks up an operator by name
    pub fn from_name(name: &str) -> QueryResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| QueryError::UnknownOperator(name.to_string()))
    }

    /// Returns true for `orderBy` and `orderByDescending`
    pub fn starts_ordering(&self) -> bool {
        matches!(self, OperatorKind::OrderBy | OperatorKind::OrderByDescending)
    }

    /// Returns true for `thenBy` and `thenByDescending`
    pub fn continues_ordering(&self) -> bool {
        matches!(self, OperatorKind::ThenBy | OperatorKind::ThenByDescending)
    }

    pub fn is_ordering(&self) -> bool {
        self.starts_ordering() || self.continues_ordering()
    }

    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            OperatorKind::OrderByDescending | OperatorKind::ThenByDescending
        )
    }

    /// Returns true if the operator produces a value rather than a sequence
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperatorKind::First
                | OperatorKind::FirstOrDefault
                | OperatorKind::Last
                | OperatorKind::LastOrDefault
                | OperatorKind::Single
                | OperatorKind::SingleOrDefault
                | OperatorKind::ElementAt
                | OperatorKind::ElementAtOrDefault
                | OperatorKind::Contains
                | OperatorKind::SequenceEqual
                | OperatorKind::Any
                | OperatorKind::All
                | OperatorKind::Count
                | OperatorKind::Min
                | OperatorKind::Max
                | OperatorKind::Sum
                | OperatorKind::Average
                | OperatorKind::Aggregate
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub type UnaryFn = Rc<dyn Fn(&Item) -> Item>;
pub type BinaryFn = Rc<dyn Fn(&Item, &Item) -> Item>;

/// An externally supplied function: predicate, selector, comparer or folder
#[derive(Clone)]
pub enum Callable {
    Unary(UnaryFn),
    Binary(BinaryFn),
}

impl Callable {
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        Callable::Unary(Rc::new(f))
    }

    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(&Item, &Item) -> Item + 'static,
    {
        Callable::Binary(Rc::new(f))
    }

    /// Wraps a boolean predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        Callable::unary(move |item| Item::Bool(f(item)))
    }

    /// Wraps a boolean two-argument comparer
    pub fn comparer<F>(f: F) -> Self
    where
        F: Fn(&Item, &Item) -> bool + 'static,
    {
        Callable::binary(move |a, b| Item::Bool(f(a, b)))
    }

    /// Calls with one argument. A binary callable receives `Null` as its second.
    pub fn call(&self, item: &Item) -> Item {
        match self {
            Callable::Unary(f) => f(item),
            Callable::Binary(f) => f(item, &Item::Null),
        }
    }

    /// Calls with two arguments. A unary callable ignores the second.
    pub fn call2(&self, a: &Item, b: &Item) -> Item {
        match self {
            Callable::Unary(f) => f(a),
            Callable::Binary(f) => f(a, b),
        }
    }

    /// Calls with one argument and interprets the result by truthiness
    pub fn test(&self, item: &Item) -> bool {
        self.call(item).is_truthy()
    }

    pub fn test2(&self, a: &Item, b: &Item) -> bool {
        self.call2(a, b).is_truthy()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Unary(_) => write!(f, "Callable::Unary(..)"),
            Callable::Binary(_) => write!(f, "Callable::Binary(..)"),
        }
    }
}

/// A query part argument: a literal value or a function
#[derive(Debug, Clone)]
pub enum Argument {
    Literal(Item),
    Function(Callable),
}

impl Argument {
    pub fn literal(value: impl Into<Item>) -> Self {
        Argument::Literal(value.into())
    }

    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&Item) -> Item + 'static,
    {
        Argument::Function(Callable::unary(f))
    }

    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(&Item, &Item) -> Item + 'static,
    {
        Argument::Function(Callable::binary(f))
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        Argument::Function(Callable::predicate(f))
    }

    pub fn as_literal(&self) -> Option<&Item> {
        match self {
            Argument::Literal(item) => Some(item),
            Argument::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&Callable> {
        match self {
            Argument::Function(callable) => Some(callable),
            Argument::Literal(_) => None,
        }
    }
}

impl From<Callable> for Argument {
    fn from(callable: Callable) -> Self {
        Argument::Function(callable)
    }
}

/// One operator application with its arguments
#[derive(Debug, Clone)]
pub struct QueryPart {
    kind: OperatorKind,
    arguments: Vec<Argument>,
}

impl QueryPart {
    pub fn new(kind: OperatorKind, arguments: Vec<Argument>) -> Self {
        Self { kind, arguments }
    }

    /// Builds a part from an operator name.
    ///
    /// Fails with `UnknownOperator` if no operator has that name.
    pub fn named(name: &str, arguments: Vec<Argument>) -> QueryResult<Self> {
        Ok(Self::new(OperatorKind::from_name(name)?, arguments))
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Returns the function at `index`, if that argument is a function
    pub fn function(&self, index: usize) -> Option<&Callable> {
        self.arguments.get(index).and_then(Argument::as_function)
    }

    /// Returns the literal at `index`, if that argument is a literal
    pub fn literal(&self, index: usize) -> Option<&Item> {
        self.arguments.get(index).and_then(Argument::as_literal)
    }

    pub(crate) fn require_function(&self, index: usize, what: &str) -> QueryResult<&Callable> {
        self.function(index).ok_or_else(|| {
            QueryError::invalid_argument(self.kind.name(), format!("missing {}", what))
        })
    }

    pub(crate) fn require_literal(&self, index: usize, what: &str) -> QueryResult<&Item> {
        self.literal(index).ok_or_else(|| {
            QueryError::invalid_argument(self.kind.name(), format!("missing {}", what))
        })
    }

    /// Integer literal at `index`
    pub(crate) fn require_integer(&self, index: usize, what: &str) -> QueryResult<i64> {
        self.require_literal(index, what)?.as_i64().ok_or_else(|| {
            QueryError::invalid_argument(self.kind.name(), format!("{} must be an integer", what))
        })
    }

    /// Array literal at `index`, as its elements
    pub(crate) fn require_items(&self, index: usize, what: &str) -> QueryResult<Vec<Item>> {
        match self.require_literal(index, what)? {
            Item::Array(items) => Ok(items.to_vec()),
            other => Err(QueryError::invalid_argument(
                self.kind.name(),
                format!("{} must be an array, got {}", what, other.type_tag()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for kind in OperatorKind::ALL {
            assert_eq!(OperatorKind::from_name(kind.name()), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_operator() {
        let err = QueryPart::named("pivot", vec![]).unwrap_err();
        assert_eq!(err, QueryError::UnknownOperator("pivot".into()));
    }

    #[test]
    fn test_ordering_classification() {
        assert!(OperatorKind::OrderBy.starts_ordering());
        assert!(OperatorKind::ThenByDescending.continues_ordering());
        assert!(OperatorKind::ThenByDescending.is_descending());
        assert!(!OperatorKind::Where.is_ordering());
        assert!(OperatorKind::Count.is_terminal());
        assert!(!OperatorKind::Select.is_terminal());
    }

    #[test]
    fn test_callable_arity_adaptation() {
        let unary = Callable::unary(|x| x.clone());
        assert_eq!(unary.call2(&Item::from(1), &Item::from(2)), Item::from(1));

        let binary = Callable::binary(|a, b| Item::Bool(a.is_null() || b.is_null()));
        assert!(binary.test(&Item::from(1)));
    }

    #[test]
    fn test_argument_accessors() {
        let part = QueryPart::new(
            OperatorKind::Take,
            vec![Argument::literal(3), Argument::predicate(|_| true)],
        );
        assert_eq!(part.require_integer(0, "count"), Ok(3));
        assert!(part.function(1).is_some());
        assert!(part.function(0).is_none());
        assert!(part.require_function(2, "predicate").is_err());
    }

    #[test]
    fn test_require_items_rejects_scalars() {
        let part = QueryPart::new(OperatorKind::Union, vec![Argument::literal(5)]);
        assert!(matches!(
            part.require_items(0, "other sequence"),
            Err(QueryError::InvalidArgument { operator: "union", .. })
        ));
    }
}
