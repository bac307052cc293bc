// Classification, counting and report text of the harness.

use testbench::cli::output::OutputBuffer;
use testbench::subject::{expect_arity, number_arg, Function, Subject, SubjectError};
use testbench::test_harness::{Harness, HarnessConfig, Tally, TestResult};
use testbench::{values, TestCase, Value};

fn harness() -> Harness<OutputBuffer> {
    Harness::with_output(HarnessConfig::default(), OutputBuffer::new())
}

fn add() -> impl Subject {
    Function::new("add", |args: &[Value]| {
        expect_arity(args, 2)?;
        if let (Some(a), Some(b)) = (args[0].as_int(), args[1].as_int()) {
            return Ok(Value::Int(a + b));
        }
        Ok(Value::Float(number_arg(args, 0)? + number_arg(args, 1)?))
    })
}

fn boom() -> impl Subject {
    Function::new("boom", |_: &[Value]| Err(SubjectError::new("boom went the function")))
}

fn assert_consistent(tally: Tally) {
    assert_eq!(tally.total, tally.passed + tally.failed + tally.errored);
}

#[test]
fn passing_test_counts_as_passed() {
    let mut h = harness();
    let result = h.run_test(&add(), &values![1, 2], &Value::Int(3), Some("simple"));
    assert_eq!(result, TestResult::Pass);
    assert_eq!(
        h.tally(),
        Tally {
            total: 1,
            passed: 1,
            failed: 0,
            errored: 0
        }
    );
    let out = h.output().as_str();
    assert!(out.contains("✓ simple PASSED"));
    assert!(out.contains("  Input: [1, 2]"));
    assert!(out.contains("  Expected: 3"));
    assert!(out.contains("  Actual: 3"));
}

#[test]
fn failing_test_explains_too_small() {
    let mut h = harness();
    let result = h.run_test(&add(), &values![2, 2], &Value::Int(5), Some("fail"));
    assert_eq!(result, TestResult::Fail);
    assert_eq!(h.tally().failed, 1);
    let out = h.output().as_str();
    assert!(out.contains("✗ fail FAILED"));
    assert!(out.contains("  Actual: 4"));
    assert!(out.contains("Hint: The result (4) is too small"));
}

#[test]
fn raising_function_is_an_error_not_a_failure() {
    let mut h = harness();
    let result = h.run_test(&boom(), &values![1], &Value::Nil, Some("boom"));
    assert_eq!(result, TestResult::Error);
    assert_eq!(
        h.tally(),
        Tally {
            total: 1,
            passed: 0,
            failed: 0,
            errored: 1
        }
    );
    let out = h.output().as_str();
    assert!(out.contains("✗ boom ERROR - function returned an error"));
    assert!(out.contains("  Error: boom went the function"));
    assert!(out.contains("  Traceback:"));
    assert!(!out.contains("Hint:"));
}

#[test]
fn panicking_function_is_an_error() {
    let explode = Function::new("explode", |args: &[Value]| Ok(args[3].clone()));
    let mut h = harness();
    let result = h.run_test(&explode, &values![1], &Value::Int(1), None);
    assert_eq!(result, TestResult::Error);
    let out = h.output().as_str();
    assert!(out.contains("✗ Test #1 ERROR - function panicked"));
    assert!(out.contains("index out of bounds"));
}

#[test]
fn arity_mismatch_surfaces_as_error() {
    let mut h = harness();
    let result = h.run_test(&add(), &values![1], &Value::Int(1), Some("arity"));
    assert_eq!(result, TestResult::Error);
    assert!(h.output().as_str().contains("expected 2 arguments, got 1"));
}

#[test]
fn kind_mismatch_hint_names_both_kinds() {
    let stringify = Function::new("stringify", |args: &[Value]| Ok(Value::from(args[0].to_string())));
    let mut h = harness();
    let result = h.run_test(&stringify, &values![1], &Value::Int(1), Some("kinds"));
    assert_eq!(result, TestResult::Fail);
    assert!(h
        .output()
        .as_str()
        .contains("Hint: The function returned a string, but we expected a number"));
}

#[test]
fn classification_is_repeatable() {
    let mut h = harness();
    let cases = [
        (values![1, 2], Value::Int(3)),
        (values![1, 2], Value::Int(4)),
        (values![1], Value::Int(1)),
    ];
    for (inputs, expected) in &cases {
        let first = h.run_test(&add(), inputs, expected, None);
        let second = h.run_test(&add(), inputs, expected, None);
        assert_eq!(first, second);
        assert_consistent(h.tally());
    }
    assert_eq!(
        h.tally(),
        Tally {
            total: 6,
            passed: 2,
            failed: 2,
            errored: 2
        }
    );
}

#[test]
fn exactly_one_counter_moves_per_test() {
    let mut h = harness();
    let (add, boom) = (add(), boom());
    let subjects = [
        (&add as &dyn Subject, Value::Int(3), TestResult::Pass),
        (&add as &dyn Subject, Value::Int(0), TestResult::Fail),
        (&boom as &dyn Subject, Value::Int(3), TestResult::Error),
    ];
    for (subject, expected, want) in &subjects {
        let before = h.tally();
        let got = h.run_test(*subject, &values![1, 2], expected, None);
        let after = h.tally();
        assert_eq!(got, *want);
        assert_eq!(after.total, before.total + 1);
        let moved = [
            after.passed - before.passed,
            after.failed - before.failed,
            after.errored - before.errored,
        ];
        assert_eq!(moved.iter().sum::<usize>(), 1);
    }
}

#[test]
fn suite_runs_every_case_in_order() {
    let mut h = harness();
    let tally = h.run_suite(
        &add(),
        vec![
            TestCase::new(values![1, 2], 3).named("first"),
            TestCase::new(values![2, 2], 5).named("second"),
            TestCase::new(values![0, 0], 0),
        ],
    );
    assert_eq!(
        tally,
        Tally {
            total: 3,
            passed: 2,
            failed: 1,
            errored: 0
        }
    );
    let out = h.output().as_str();
    assert!(out.contains("Testing function: add"));
    let first = out.find("first PASSED").unwrap();
    let second = out.find("second FAILED").unwrap();
    let third = out.find("Test #3 PASSED").unwrap();
    assert!(first < second && second < third);
    assert!(out.contains("Success rate: 66.67%"));
}

#[test]
fn empty_suite_only_warns() {
    let mut h = harness();
    h.run_test(&add(), &values![1, 1], &Value::Int(2), None);
    let before = h.tally();
    let after = h.run_suite(&add(), Vec::<TestCase>::new());
    assert_eq!(before, after);
    let out = h.output().as_str();
    assert!(out.contains("Warning: No test cases provided!"));
    assert!(!out.contains("Starting test suite"));
}

#[test]
fn malformed_case_is_skipped_and_the_rest_still_run() {
    let rows = vec![
        Value::List(values![vec![1, 2], 3, "ok"]),
        Value::List(values![vec![1], 2, "n", "extra"]),
        Value::List(values![vec![2, 3], 5]),
    ];
    let mut h = harness();
    let tally = h.run_suite(&add(), rows);
    assert_eq!(tally.total, 2);
    assert_eq!(tally.passed, 2);
    assert_consistent(tally);
    let out = h.output().as_str();
    assert!(out.contains("Invalid test case format: expected 2 or 3 elements, got 4"));
    assert!(out.contains("Test #2 PASSED"));
}

#[test]
fn tuples_are_accepted_as_cases() {
    let mut h = harness();
    let tally = h.run_suite(&add(), vec![(values![1, 2], 3, "named"), (values![2, 2], 4, "")]);
    assert_eq!(tally.passed, 2);
    assert!(h.output().as_str().contains("Test #2 PASSED"));
}

#[test]
fn summary_reports_cumulative_counts() {
    let mut h = harness();
    h.run_suite(&add(), vec![(values![1, 1], 2)]);
    h.run_suite(&boom(), vec![(values![1, 1], 2)]);
    let out = h.output().as_str();
    let last_summary = &out[out.rfind("Test Suite Summary:").unwrap()..];
    assert!(last_summary.contains("Total tests: 2"));
    assert!(last_summary.contains("Passed: 1"));
    assert!(last_summary.contains("Errors: 1"));
    assert!(!last_summary.contains("Failed:"));
    assert!(last_summary.contains("Success rate: 50.00%"));
}

#[test]
fn redirected_output_has_no_escape_codes() {
    let mut h = harness();
    h.run_suite(&add(), vec![(values![1, 1], 3)]);
    assert!(!h.output().as_str().contains('\x1b'));
}
