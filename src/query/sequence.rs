//! Pull-based lazy sequences
//!
//! A `Sequence` is single-pass: work for an item happens when the item is
//! pulled, and once the stream has returned `None` or an error it stays
//! exhausted. Re-iterating means re-executing the query.

use std::fmt;

use crate::executor::{QueryError, QueryResult};
use crate::value::Item;

type Producer = Box<dyn Iterator<Item = QueryResult<Item>>>;

/// A lazily produced, single-pass stream of items
pub struct Sequence {
    producer: Producer,
    exhausted: bool,
}

impl Sequence {
    /// Wraps a fallible producer
    pub fn new<I>(producer: I) -> Self
    where
        I: Iterator<Item = QueryResult<Item>> + 'static,
    {
        Self {
            producer: Box::new(producer),
            exhausted: false,
        }
    }

    /// Wraps infallible items
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Item>,
        I::IntoIter: 'static,
    {
        Self::new(items.into_iter().map(Ok))
    }

    /// Elements of an array item. Anything else is not a sequence.
    pub fn from_array(source: &Item) -> QueryResult<Self> {
        match source {
            Item::Array(items) => Ok(Self::from_items(items.to_vec())),
            Item::Null => Err(QueryError::InvalidSource("source is null".into())),
            other => Err(QueryError::InvalidSource(format!(
                "expected an array, got {}",
                other.type_tag()
            ))),
        }
    }

    pub fn empty() -> Self {
        Self::from_items(Vec::new())
    }

    /// Defers materialization until the first pull
    pub fn deferred<F>(materialize: F) -> Self
    where
        F: FnOnce() -> QueryResult<Vec<Item>> + 'static,
    {
        Self::new(
            std::iter::once_with(materialize).flat_map(|result| -> Producer {
                match result {
                    Ok(items) => Box::new(items.into_iter().map(Ok)),
                    Err(e) => Box::new(std::iter::once(Err(e))),
                }
            }),
        )
    }

    /// Returns true once the producer has finished or failed
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Drains the sequence, stopping at the first error
    pub fn collect_items(self) -> QueryResult<Vec<Item>> {
        self.collect()
    }
}

impl Iterator for Sequence {
    type Item = QueryResult<Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.producer.next() {
            Some(Ok(item)) => Some(Ok(item)),
            Some(Err(e)) => {
                self.exhausted = true;
                Some(Err(e))
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
