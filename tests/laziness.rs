//! Laziness Tests
//!
//! Pull-based execution:
//! - Non-terminal parts do no work until pulled
//! - Short-circuiting operators stop pulling early
//! - Sequences are single-pass

use std::cell::Cell;
use std::rc::Rc;

use seqquery::query::source;
use seqquery::{Item, Query, QueryError, Sequence};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

/// An unbounded producer counting how many items were pulled from it
fn counting_naturals(pulls: &Rc<Cell<usize>>) -> Sequence {
    let pulls = Rc::clone(pulls);
    Sequence::new((0..).map(move |n: i64| {
        pulls.set(pulls.get() + 1);
        Ok(Item::from(n))
    }))
}

fn counting_predicate(calls: &Rc<Cell<usize>>) -> impl Fn(&Item) -> bool + 'static {
    let calls = Rc::clone(calls);
    move |_| {
        calls.set(calls.get() + 1);
        true
    }
}

// =============================================================================
// Deferred Execution
// =============================================================================

#[test]
fn test_take_pulls_exactly_n() {
    let pulls = Rc::new(Cell::new(0));
    let output = Query::new()
        .take(5)
        .execute_sequence(counting_naturals(&pulls))
        .unwrap();

    let items = output.into_items().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(pulls.get(), 5);
}

#[test]
fn test_non_terminal_parts_do_nothing_until_pulled() {
    let calls = Rc::new(Cell::new(0));
    let output = Query::new()
        .where_(counting_predicate(&calls))
        .select(|x| x.clone())
        .execute(json!([1, 2, 3]))
        .unwrap();
    assert_eq!(calls.get(), 0);

    let mut sequence = output.into_sequence().unwrap();
    assert_eq!(sequence.next(), Some(Ok(Item::from(1))));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_ordering_materializes_on_first_pull() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let output = Query::new()
        .order_by(move |x| {
            counter.set(counter.get() + 1);
            x.clone()
        })
        .execute(json!([3, 1, 2]))
        .unwrap();
    assert_eq!(calls.get(), 0);

    let items = output.into_items().unwrap();
    assert_eq!(items, vec![Item::from(1), Item::from(2), Item::from(3)]);
    assert!(calls.get() > 0);
}

// =============================================================================
// Short Circuits
// =============================================================================

#[test]
fn test_first_stops_at_match() {
    let pulls = Rc::new(Cell::new(0));
    let output = Query::new()
        .first_where(|x| x.as_f64() == Some(3.0))
        .execute_sequence(counting_naturals(&pulls))
        .unwrap();
    assert_eq!(output.into_value(), Some(Item::from(3)));
    assert_eq!(pulls.get(), 4);
}

#[test]
fn test_any_and_take_while_stop_early() {
    let pulls = Rc::new(Cell::new(0));
    let output = Query::new()
        .any()
        .execute_sequence(counting_naturals(&pulls))
        .unwrap();
    assert_eq!(output.into_value(), Some(Item::from(true)));
    assert_eq!(pulls.get(), 1);

    let pulls = Rc::new(Cell::new(0));
    let output = Query::new()
        .take_while(|x| x.as_f64() < Some(3.0))
        .count()
        .execute_sequence(counting_naturals(&pulls))
        .unwrap();
    assert_eq!(output.into_value(), Some(Item::from(3)));
    assert_eq!(pulls.get(), 4);
}

#[test]
fn test_element_at_stops_at_index() {
    let pulls = Rc::new(Cell::new(0));
    let output = Query::new()
        .element_at(2)
        .execute_sequence(counting_naturals(&pulls))
        .unwrap();
    assert_eq!(output.into_value(), Some(Item::from(2)));
    assert_eq!(pulls.get(), 3);
}

// =============================================================================
// Single Pass And Errors
// =============================================================================

#[test]
fn test_sequence_is_single_pass() {
    let output = Query::new()
        .skip(1)
        .execute_sequence(source::range(0, 3).unwrap())
        .unwrap();
    let mut sequence = output.into_sequence().unwrap();
    assert_eq!(sequence.by_ref().count(), 2);
    assert!(sequence.is_exhausted());
    assert_eq!(sequence.next(), None);
}

#[test]
fn test_error_surfaces_on_pull() {
    let output = Query::new().cast("number").execute(json!([1, "x", 3])).unwrap();
    let mut sequence = output.into_sequence().unwrap();

    assert_eq!(sequence.next(), Some(Ok(Item::from(1))));
    assert!(matches!(
        sequence.next(),
        Some(Err(QueryError::InvalidCast { .. }))
    ));
    assert_eq!(sequence.next(), None);
}

#[test]
fn test_repeat_source() {
    let output = Query::new()
        .count()
        .execute_sequence(source::repeat(Item::from("x"), 4).unwrap())
        .unwrap();
    assert_eq!(output.into_value(), Some(Item::from(4)));
}
