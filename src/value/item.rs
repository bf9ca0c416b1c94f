//! Dynamically typed items flowing through a query pipeline
//!
//! Strings, arrays and objects are reference counted. Cloning an item clones
//! the handle, so a composite item keeps its identity as it moves between
//! operators, independently of its structural contents.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Runtime type of an item, used by `ofType` and `cast`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl TypeTag {
    /// Returns the type name accepted by `parse`
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    /// Parses a type name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "null" => Some(TypeTag::Null),
            "boolean" | "bool" => Some(TypeTag::Boolean),
            "number" => Some(TypeTag::Number),
            "string" => Some(TypeTag::String),
            "array" => Some(TypeTag::Array),
            "object" => Some(TypeTag::Object),
            _ => None,
        }
    }

    /// Sort rank across types: null < bool < number < string < array < object
    pub(crate) fn rank(&self) -> u8 {
        match self {
            TypeTag::Null => 0,
            TypeTag::Boolean => 1,
            TypeTag::Number => 2,
            TypeTag::String => 3,
            TypeTag::Array => 4,
            TypeTag::Object => 5,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single element of a sequence
#[derive(Debug, Clone)]
pub enum Item {
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<Vec<Item>>),
    Object(Rc<BTreeMap<String, Item>>),
}

impl Item {
    /// Creates a string item
    pub fn string(s: impl AsRef<str>) -> Self {
        Item::String(Rc::from(s.as_ref()))
    }

    /// Creates an array item with a fresh identity
    pub fn array(items: Vec<Item>) -> Self {
        Item::Array(Rc::new(items))
    }

    /// Creates an object item with a fresh identity
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Item)>,
    {
        Item::Object(Rc::new(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Returns the runtime type of this item
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Item::Null => TypeTag::Null,
            Item::Bool(_) => TypeTag::Boolean,
            Item::Number(_) => TypeTag::Number,
            Item::String(_) => TypeTag::String,
            Item::Array(_) => TypeTag::Array,
            Item::Object(_) => TypeTag::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Item::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Item::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Item::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an integer if it has no fractional part
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Item::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Item::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Item]> {
        match self {
            Item::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Looks up an object field
    pub fn get(&self, key: &str) -> Option<&Item> {
        match self {
            Item::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Truthiness: null, false, 0, NaN and "" are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Item::Null => false,
            Item::Bool(b) => *b,
            Item::Number(n) => *n != 0.0 && !n.is_nan(),
            Item::String(s) => !s.is_empty(),
            Item::Array(_) | Item::Object(_) => true,
        }
    }

    /// Numeric value of a primitive: numbers, booleans as 0/1, numeric strings
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Item::Number(n) => Some(*n),
            Item::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Item::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// Converts this item to the target type.
    ///
    /// Primitives are converted where a conversion exists; arrays and objects
    /// only pass when they already are of the target kind. Returns `None`
    /// when no conversion applies.
    pub fn cast_to(&self, target: TypeTag) -> Option<Item> {
        if self.type_tag() == target {
            return Some(self.clone());
        }
        match (target, self) {
            (TypeTag::Number, Item::Bool(_) | Item::String(_)) => {
                self.to_number().map(Item::Number)
            }
            (TypeTag::String, Item::Bool(b)) => Some(Item::string(b.to_string())),
            (TypeTag::String, Item::Number(n)) => Some(Item::string(format_number(*n))),
            (TypeTag::Boolean, Item::Number(_) | Item::String(_)) => {
                Some(Item::Bool(self.is_truthy()))
            }
            _ => None,
        }
    }

    /// Converts to a JSON value. Non-finite numbers become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Item::Null => Value::Null,
            Item::Bool(b) => Value::Bool(*b),
            Item::Number(n) => number_to_json(*n),
            Item::String(s) => Value::String(s.to_string()),
            Item::Array(items) => Value::Array(items.iter().map(Item::to_json).collect()),
            Item::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Structural equality
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        super::equality::structurally_equal(self, other)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Item::Null,
            Value::Bool(b) => Item::Bool(b),
            Value::Number(n) => Item::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Item::string(s),
            Value::Array(items) => Item::array(items.into_iter().map(Item::from).collect()),
            Value::Object(fields) => {
                Item::object(fields.into_iter().map(|(k, v)| (k, Item::from(v))))
            }
        }
    }
}

impl From<bool> for Item {
    fn from(b: bool) -> Self {
        Item::Bool(b)
    }
}

impl From<i64> for Item {
    fn from(n: i64) -> Self {
        Item::Number(n as f64)
    }
}

impl From<i32> for Item {
    fn from(n: i32) -> Self {
        Item::Number(f64::from(n))
    }
}

impl From<usize> for Item {
    fn from(n: usize) -> Self {
        Item::Number(n as f64)
    }
}

impl From<f64> for Item {
    fn from(n: f64) -> Self {
        Item::Number(n)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::string(s)
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::string(s)
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::array(items)
    }
}

impl<T: Into<Item>> From<Option<T>> for Item {
    fn from(value: Option<T>) -> Self {
        value.map_or(Item::Null, Into::into)
    }
}
