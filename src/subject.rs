//! The function under test and the error it reports when it cannot produce a value.

use crate::value::{Value, ValueKind};
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// A callable that a harness can run test cases against.
pub trait Subject {
    /// Name shown in the suite banner.
    fn name(&self) -> &str;

    /// Invokes the callable with `args` as positional arguments.
    fn call(&self, args: &[Value]) -> Result<Value, SubjectError>;
}

/// Adapts a named closure into a [`Subject`].
///
/// ```rust
/// use testbench::subject::{expect_arity, number_arg, Function, Subject};
/// use testbench::{values, value::Value};
///
/// let double = Function::new("double", |args: &[Value]| {
///     expect_arity(args, 1)?;
///     Ok(Value::Float(number_arg(args, 0)? * 2.0))
/// });
/// assert_eq!(double.name(), "double");
/// assert_eq!(double.call(&values![2]).unwrap(), Value::Int(4));
/// ```
pub struct Function<F> {
    name: String,
    func: F,
}

impl<F> Function<F>
where
    F: Fn(&[Value]) -> Result<Value, SubjectError>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Subject for Function<F>
where
    F: Fn(&[Value]) -> Result<Value, SubjectError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &[Value]) -> Result<Value, SubjectError> {
        (self.func)(args)
    }
}

impl<S: Subject + ?Sized> Subject for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn call(&self, args: &[Value]) -> Result<Value, SubjectError> {
        (**self).call(args)
    }
}

// ============================================================================
// SUBJECT ERROR
// ============================================================================

/// Error raised by a function under test.
///
/// The stack trace is captured when the error is built, so the report points
/// at the code that gave up rather than at the harness.
#[derive(Debug)]
pub struct SubjectError {
    message: String,
    source: Option<BoxedSource>,
    trace: Backtrace,
}

impl SubjectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            trace: Backtrace::force_capture(),
        }
    }

    /// Wraps an underlying error with a message describing what was attempted.
    pub fn wrap<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(message)
        }
    }

    /// Builds an error whose message is the display of `err`.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = err.to_string();
        // Keep the chain intact by storing the original error as the source.
        if err.source().is_some() {
            Self::wrap(message, err)
        } else {
            Self::new(message)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &Backtrace {
        &self.trace
    }
}

impl fmt::Display for SubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for SubjectError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn StdError + 'static))
    }
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

/// Fails unless exactly `expected` arguments were supplied.
pub fn expect_arity(args: &[Value], expected: usize) -> Result<(), SubjectError> {
    if args.len() == expected {
        return Ok(());
    }
    let noun = if expected == 1 { "argument" } else { "arguments" };
    Err(SubjectError::new(format!(
        "expected {} {}, got {}",
        expected,
        noun,
        args.len()
    )))
}

fn arg(args: &[Value], index: usize) -> Result<&Value, SubjectError> {
    args.get(index).ok_or_else(|| {
        SubjectError::new(format!("missing argument {}", index + 1))
    })
}

fn wrong_kind(index: usize, wanted: ValueKind, got: &Value) -> SubjectError {
    SubjectError::new(format!(
        "argument {} must be {}, got {}",
        index + 1,
        wanted.with_article(),
        got.kind().with_article()
    ))
}

/// Reads argument `index` as a number.
pub fn number_arg(args: &[Value], index: usize) -> Result<f64, SubjectError> {
    let value = arg(args, index)?;
    value
        .as_number()
        .ok_or_else(|| wrong_kind(index, ValueKind::Number, value))
}

/// Reads argument `index` as a string.
pub fn str_arg(args: &[Value], index: usize) -> Result<&str, SubjectError> {
    let value = arg(args, index)?;
    value
        .as_str()
        .ok_or_else(|| wrong_kind(index, ValueKind::Text, value))
}
