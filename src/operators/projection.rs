//! Projection operators: select, selectMany

use crate::executor::{QueryError, QueryResult};
use crate::query::{Callable, Sequence};
use crate::value::Item;

/// 1:1 projection
pub fn select(source: Sequence, selector: Callable) -> Sequence {
    Sequence::new(source.map(move |pulled| pulled.map(|item| selector.call(&item))))
}

/// 1:N projection. The selector must return an array; its elements are
/// flattened into the output, optionally passed through a result selector
/// together with the source item.
pub fn select_many(
    source: Sequence,
    selector: Callable,
    result_selector: Option<Callable>,
) -> Sequence {
    Sequence::new(source.flat_map(move |pulled| -> Vec<QueryResult<Item>> {
        let item = match pulled {
            Ok(item) => item,
            Err(e) => return vec![Err(e)],
        };
        let inner = selector.call(&item);
        let Some(children) = inner.as_array() else {
            return vec![Err(QueryError::invalid_argument(
                "selectMany",
                format!("selector returned {}, expected an array", inner.type_tag()),
            ))];
        };
        children
            .iter()
            .map(|child| {
                Ok(match &result_selector {
                    Some(result) => result.call2(&item, child),
                    None => child.clone(),
                })
            })
            .collect()
    }))
}
