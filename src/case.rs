//! Test cases and the conversions that accept them in their loose forms.

use crate::value::{Value, ValueKind};
use thiserror::Error;

/// One input/expected/name triple run against a function under test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub inputs: Vec<Value>,
    pub expected: Value,
    pub name: Option<String>,
}

impl TestCase {
    pub fn new(inputs: Vec<Value>, expected: impl Into<Value>) -> Self {
        Self {
            inputs,
            expected: expected.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name when one was given and it is not empty.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Why a loosely-shaped test case was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseFormatError {
    #[error("expected a list of 2 or 3 elements, got {}", .0.with_article())]
    NotAList(ValueKind),
    #[error("expected a list of 2 or 3 elements, got a mapping")]
    Mapping,
    #[error("expected a list of 2 or 3 elements, got an unsupported value")]
    Unsupported,
    #[error("expected 2 or 3 elements, got {0}")]
    WrongLength(usize),
    #[error("inputs must be a list of arguments, got {}", .0.with_article())]
    InputsNotList(ValueKind),
    #[error("test name must be a single value, got {}", .0.with_article())]
    NameNotScalar(ValueKind),
}

/// Anything a suite accepts as a test case.
///
/// Typed cases and tuples always convert; raw [`Value`] rows (as loaded from
/// suite files) are validated for shape first.
pub trait IntoTestCase {
    fn into_test_case(self) -> Result<TestCase, CaseFormatError>;
}

impl IntoTestCase for TestCase {
    fn into_test_case(self) -> Result<TestCase, CaseFormatError> {
        Ok(self)
    }
}

impl<E: Into<Value>> IntoTestCase for (Vec<Value>, E) {
    fn into_test_case(self) -> Result<TestCase, CaseFormatError> {
        Ok(TestCase::new(self.0, self.1))
    }
}

impl<E: Into<Value>, N: Into<String>> IntoTestCase for (Vec<Value>, E, N) {
    fn into_test_case(self) -> Result<TestCase, CaseFormatError> {
        Ok(TestCase::new(self.0, self.1).named(self.2))
    }
}

impl IntoTestCase for Value {
    fn into_test_case(self) -> Result<TestCase, CaseFormatError> {
        let items = match self {
            Value::List(items) => items,
            other => return Err(CaseFormatError::NotAList(other.kind())),
        };
        if !(2..=3).contains(&items.len()) {
            return Err(CaseFormatError::WrongLength(items.len()));
        }

        let mut parts = items.into_iter();
        let inputs = match parts.next() {
            Some(Value::List(inputs)) => inputs,
            Some(other) => return Err(CaseFormatError::InputsNotList(other.kind())),
            None => return Err(CaseFormatError::WrongLength(0)),
        };
        let expected = parts.next().unwrap_or_default();
        // Any scalar can label a case; numbers and booleans use their display form.
        let name = match parts.next() {
            None | Some(Value::Nil) => None,
            Some(Value::Str(name)) => Some(name),
            Some(list @ Value::List(_)) => {
                return Err(CaseFormatError::NameNotScalar(list.kind()))
            }
            Some(other) => Some(other.to_string()),
        };

        Ok(TestCase {
            inputs,
            expected,
            name,
        })
    }
}
