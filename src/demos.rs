//! Built-in functions for demonstrating the harness, with their default suites.

use crate::case::TestCase;
use crate::subject::{expect_arity, number_arg, str_arg, Subject, SubjectError};
use crate::value::Value;
use crate::values;

type DemoFn = fn(&[Value]) -> Result<Value, SubjectError>;

/// A named demonstration function and the suite that exercises it.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    func: DemoFn,
    cases: fn() -> Vec<TestCase>,
}

impl Demo {
    /// The default suite for this function.
    pub fn cases(&self) -> Vec<TestCase> {
        (self.cases)()
    }
}

impl Subject for Demo {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, args: &[Value]) -> Result<Value, SubjectError> {
        (self.func)(args)
    }
}

pub static DEMOS: [Demo; 4] = [
    Demo {
        name: "add_numbers",
        description: "Simple function to add two numbers.",
        func: add_numbers,
        cases: add_numbers_cases,
    },
    Demo {
        name: "calculate_grade",
        description: "Convert a numerical mark to a letter grade.",
        func: calculate_grade,
        cases: calculate_grade_cases,
    },
    Demo {
        name: "celsius_to_fahrenheit",
        description: "Convert Celsius temperature to Fahrenheit.",
        func: celsius_to_fahrenheit,
        cases: celsius_to_fahrenheit_cases,
    },
    Demo {
        name: "count_vowels",
        description: "Count the number of vowels in a string.",
        func: count_vowels,
        cases: count_vowels_cases,
    },
];

/// Looks up a built-in function by name.
pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

// ============================================================================
// FUNCTIONS
// ============================================================================

fn add_numbers(args: &[Value]) -> Result<Value, SubjectError> {
    expect_arity(args, 2)?;
    if let (Some(a), Some(b)) = (args[0].as_int(), args[1].as_int()) {
        return a
            .checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| SubjectError::new(format!("{} + {} overflows", a, b)));
    }
    Ok(Value::Float(number_arg(args, 0)? + number_arg(args, 1)?))
}

fn calculate_grade(args: &[Value]) -> Result<Value, SubjectError> {
    expect_arity(args, 1)?;
    let mark = number_arg(args, 0)?;
    let grade = if mark >= 70.0 {
        "A"
    } else if mark >= 60.0 {
        "B"
    } else if mark >= 50.0 {
        "C"
    } else {
        "F"
    };
    Ok(Value::from(grade))
}

fn celsius_to_fahrenheit(args: &[Value]) -> Result<Value, SubjectError> {
    expect_arity(args, 1)?;
    let celsius = number_arg(args, 0)?;
    Ok(Value::Float(celsius * 1.8 + 32.0))
}

fn count_vowels(args: &[Value]) -> Result<Value, SubjectError> {
    expect_arity(args, 1)?;
    let text = str_arg(args, 0)?;
    let count = text.chars().filter(|c| "aeiouAEIOU".contains(*c)).count();
    Ok(Value::from(count))
}

// ============================================================================
// DEFAULT SUITES
// ============================================================================

fn add_numbers_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(values![1, 2], 3).named("Simple addition"),
        TestCase::new(values![0, 0], 0).named("Zero addition"),
        TestCase::new(values![-1, 1], 0).named("Negative number"),
        TestCase::new(values![999, 1], 1000).named("Large numbers"),
    ]
}

fn calculate_grade_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(values![75], "A").named("Testing A grade"),
        TestCase::new(values![65], "B").named("Testing B grade"),
        TestCase::new(values![55], "C").named("Testing C grade"),
        TestCase::new(values![45], "F").named("Testing F grade"),
    ]
}

fn celsius_to_fahrenheit_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(values![0], 32).named("Water freezing point"),
        TestCase::new(values![100], 212).named("Water boiling point"),
        TestCase::new(values![20], 68).named("Room temperature"),
    ]
}

fn count_vowels_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(values!["hello"], 2).named("Simple word"),
        TestCase::new(values!["AEIOU"], 5).named("All vowels"),
        TestCase::new(values!["BCDFG"], 0).named("No vowels"),
        TestCase::new(values![""], 0).named("Empty string"),
    ]
}
