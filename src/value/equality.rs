//! Equality strategies
//!
//! Operators do not share one notion of equality:
//! - joins and grouping compare keys structurally
//! - distinct and sequenceEqual use loose value equality (or a comparer)
//! - set algebra and contains use identity membership

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::item::Item;

/// Caller-supplied equality predicate
pub type Comparer = Rc<dyn Fn(&Item, &Item) -> bool>;

/// Equality strategy selected per operator
#[derive(Clone)]
pub enum Equality {
    /// Primitives by value, composites by reference
    Identity,
    /// Identity plus primitive coercion (`1 == "1"`, `true == 1`)
    Loose,
    /// Deep comparison of composite contents
    Structural,
    /// Caller-supplied comparer
    Custom(Comparer),
}

impl Equality {
    pub fn matches(&self, a: &Item, b: &Item) -> bool {
        match self {
            Equality::Identity => identical(a, b),
            Equality::Loose => loosely_equal(a, b),
            Equality::Structural => structurally_equal(a, b),
            Equality::Custom(comparer) => comparer(a, b),
        }
    }
}

impl fmt::Debug for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equality::Identity => write!(f, "Identity"),
            Equality::Loose => write!(f, "Loose"),
            Equality::Structural => write!(f, "Structural"),
            Equality::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Identity equality. NaN equals NaN and 0 equals -0.
pub fn identical(a: &Item, b: &Item) -> bool {
    match (a, b) {
        (Item::Null, Item::Null) => true,
        (Item::Bool(x), Item::Bool(y)) => x == y,
        (Item::Number(x), Item::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Item::String(x), Item::String(y)) => x == y,
        (Item::Array(x), Item::Array(y)) => Rc::ptr_eq(x, y),
        (Item::Object(x), Item::Object(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// Loose value equality between primitives, identity between composites
pub fn loosely_equal(a: &Item, b: &Item) -> bool {
    match (a, b) {
        (Item::Number(x), Item::Number(y)) => x == y,
        (Item::Null, _) | (_, Item::Null) => a.is_null() && b.is_null(),
        (Item::Array(_) | Item::Object(_), _) | (_, Item::Array(_) | Item::Object(_)) => {
            identical(a, b)
        }
        (Item::String(x), Item::String(y)) => x == y,
        (Item::Bool(x), Item::Bool(y)) => x == y,
        _ => match (a.to_number(), b.to_number()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

/// Deep structural equality
pub fn structurally_equal(a: &Item, b: &Item) -> bool {
    match (a, b) {
        (Item::Null, Item::Null) => true,
        (Item::Bool(x), Item::Bool(y)) => x == y,
        (Item::Number(x), Item::Number(y)) => x == y,
        (Item::String(x), Item::String(y)) => x == y,
        (Item::Array(x), Item::Array(y)) => {
            Rc::ptr_eq(x, y)
                || (x.len() == y.len()
                    && x.iter().zip(y.iter()).all(|(l, r)| structurally_equal(l, r)))
        }
        (Item::Object(x), Item::Object(y)) => {
            Rc::ptr_eq(x, y)
                || (x.len() == y.len()
                    && x.iter().zip(y.iter()).all(|((lk, lv), (rk, rv))| {
                        lk == rk && structurally_equal(lv, rv)
                    }))
        }
        _ => false,
    }
}

/// Hash-set key with identity semantics.
///
/// Holds the item so a composite stays alive (and its address unique) for as
/// long as the key is stored.
#[derive(Debug, Clone)]
pub struct IdentityKey(Item);

impl IdentityKey {
    pub fn new(item: &Item) -> Self {
        IdentityKey(item.clone())
    }

    pub fn item(&self) -> &Item {
        &self.0
    }
}

impl PartialEq for IdentityKey {
    fn eq(&self, other: &Self) -> bool {
        identical(&self.0, &other.0)
    }
}

impl Eq for IdentityKey {}

impl Hash for IdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.type_tag().hash(state);
        match &self.0 {
            Item::Null => {}
            Item::Bool(b) => b.hash(state),
            Item::Number(n) => {
                let bits = if n.is_nan() {
                    f64::NAN.to_bits()
                } else if *n == 0.0 {
                    0.0f64.to_bits()
                } else {
                    n.to_bits()
                };
                bits.hash(state);
            }
            Item::String(s) => s.hash(state),
            Item::Array(items) => (Rc::as_ptr(items) as usize).hash(state),
            Item::Object(fields) => (Rc::as_ptr(fields) as usize).hash(state),
        }
    }
}
