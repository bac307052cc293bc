//! Dynamic values passed to and returned from a function under test.
//!
//! Test cases are written against arbitrary callables, so inputs and outputs
//! travel as a small sum type rather than as concrete Rust types. Equality is
//! per variant, with one numeric exception: an `Int` equals a `Float` holding
//! the same number, so a conversion returning `32.0` satisfies an expected `32`.

use serde::Deserialize;
use std::fmt;

/// Represents a value handed to or produced by a function under test.
///
/// # Examples
///
/// ```rust
/// use testbench::value::{Value, ValueKind};
/// let n = Value::Float(3.5);
/// assert_eq!(n.kind(), ValueKind::Number);
/// let s = Value::from("hello");
/// assert_eq!(s.kind().to_string(), "string");
/// assert!(Value::default().is_nil());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

/// The category a value belongs to, used when explaining a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Text,
    Boolean,
    List,
    Nil,
}

impl ValueKind {
    /// Returns the learner-facing name of the category.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Text => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::List => "list",
            ValueKind::Nil => "nothing",
        }
    }

    /// The name with an indefinite article, for use in sentences.
    ///
    /// ```rust
    /// use testbench::value::ValueKind;
    /// assert_eq!(ValueKind::Text.with_article(), "a string");
    /// assert_eq!(ValueKind::Nil.with_article(), "nothing");
    /// ```
    pub fn with_article(self) -> String {
        match self {
            ValueKind::Nil => self.name().to_string(),
            _ => format!("a {}", self.name()),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Returns the category of the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use testbench::value::{Value, ValueKind};
    /// assert_eq!(Value::Int(1).kind(), Value::Float(1.0).kind());
    /// assert_eq!(Value::Bool(true).kind(), ValueKind::Boolean);
    /// ```
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(_) | Value::Float(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::Text,
            Value::List(_) => ValueKind::List,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Compares two numeric values, returning `None` unless both are numbers.
    ///
    /// Integers compare exactly; anything involving a float compares as `f64`.
    pub fn numeric_lt(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a < b),
            _ => Some(self.as_number()? < other.as_number()?),
        }
    }

    /// Renders the value the way it appears nested inside a list: strings quoted.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }

    /// Renders a slice of values as a bracketed list.
    ///
    /// ```rust
    /// use testbench::value::Value;
    /// let args = [Value::from(1), Value::from("a")];
    /// assert_eq!(Value::format_list(&args), "[1, \"a\"]");
    /// ```
    pub fn format_list(items: &[Value]) -> String {
        let inner: Vec<String> = items.iter().map(Value::repr).collect();
        format!("[{}]", inner.join(", "))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => int_eq_float(*a, *b),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison: the float must be integral and inside the `i64` range.
fn int_eq_float(int: i64, float: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // Keep a trailing `.0` so floats stay distinguishable from ints.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => f.write_str(&Value::format_list(items)),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

/// Builds a `Vec<Value>` from heterogeneous literals.
///
/// ```rust
/// use testbench::{values, value::Value};
/// let args = values![1, "two", 3.0];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[1], Value::from("two"));
/// ```
#[macro_export]
macro_rules! values {
    () => { ::std::vec::Vec::<$crate::value::Value>::new() };
    ($($item:expr),+ $(,)?) => {
        vec![$($crate::value::Value::from($item)),+]
    };
}
