//! Partitioning operators: take, skip, takeWhile, skipWhile
//!
//! Negative counts are not rejected: they behave like zero.

use crate::query::{Callable, Sequence};

/// First `count` items. Stops pulling from upstream once `count` is reached.
pub fn take(source: Sequence, count: i64) -> Sequence {
    Sequence::new(source.take(count.max(0) as usize))
}

/// Everything after the first `count` items
pub fn skip(source: Sequence, count: i64) -> Sequence {
    // Errors are never skipped over.
    let mut remaining = count.max(0);
    Sequence::new(source.filter(move |pulled| {
        if pulled.is_err() || remaining == 0 {
            return true;
        }
        remaining -= 1;
        false
    }))
}

/// Items up to (not including) the first one the predicate rejects
pub fn take_while(source: Sequence, predicate: Callable) -> Sequence {
    Sequence::new(source.take_while(move |pulled| match pulled {
        Ok(item) => predicate.test(item),
        Err(_) => true,
    }))
}

/// Items from the first one the predicate rejects onwards
pub fn skip_while(source: Sequence, predicate: Callable) -> Sequence {
    Sequence::new(source.skip_while(move |pulled| match pulled {
        Ok(item) => predicate.test(item),
        Err(_) => false,
    }))
}
