//! Testbench Test Harness Library Module
//!
//! Runs test cases against a function under test, classifies each outcome,
//! and prints a human-readable report with optional colour and hints.
//!
//! # Architecture
//!
//! Each test case goes through the same phases:
//! 1. **Validation**: loosely-shaped cases are converted to [`TestCase`]s;
//!    malformed ones are reported and skipped without being counted
//! 2. **Invocation**: the subject is called with the inputs as positional
//!    arguments; error returns and panics are captured
//! 3. **Classification**: the outcome becomes [`TestResult::Pass`],
//!    [`TestResult::Fail`] or [`TestResult::Error`]
//! 4. **Reporting**: the case is printed, with a hint for failures
//!
//! After a suite, a summary with the success rate is printed.
//!
//! # Example Usage
//!
//! ```rust
//! use testbench::cli::output::OutputBuffer;
//! use testbench::subject::{expect_arity, number_arg, Function};
//! use testbench::test_harness::{Harness, HarnessConfig, TestResult};
//! use testbench::{values, value::Value};
//!
//! let add = Function::new("add", |args: &[Value]| {
//!     expect_arity(args, 2)?;
//!     Ok(Value::Float(number_arg(args, 0)? + number_arg(args, 1)?))
//! });
//! let mut harness = Harness::with_output(HarnessConfig::default(), OutputBuffer::new());
//! let result = harness.run_test(&add, &values![1, 2], &Value::Int(3), Some("simple"));
//! assert_eq!(result, TestResult::Pass);
//! assert_eq!(harness.tally().passed, 1);
//! ```

use crate::capture::{invoke, Failure};
use crate::case::{IntoTestCase, TestCase};
use crate::cli::output::{colorize, OutputSink, StdoutSink, Style};
use crate::hint::hint;
use crate::subject::Subject;
use crate::value::Value;
use chrono::Local;
use tracing::debug;

// =============================================================================
// CORE TYPES
// =============================================================================

/// Classification of a single test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestResult {
    /// The subject returned the expected value
    Pass,
    /// The subject returned a different value
    Fail,
    /// The subject returned an error or panicked
    Error,
}

/// Counters accumulated by a harness.
///
/// `total == passed + failed + errored` holds after every completed test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Tally {
    pub fn has_failures(&self) -> bool {
        self.failed + self.errored > 0
    }

    /// Percentage of tests that passed, or `None` before any test ran.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.passed as f64 / self.total as f64 * 100.0)
    }

    fn record(&mut self, result: TestResult) {
        match result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail => self.failed += 1,
            TestResult::Error => self.errored += 1,
        }
    }
}

/// Configuration for reporting, fixed when a harness is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    pub show_hints: bool,
    /// Requested colour; only honoured when the output is a terminal.
    pub use_colours: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            show_hints: true,
            use_colours: true,
        }
    }
}

// =============================================================================
// HARNESS
// =============================================================================

/// Runs test cases and reports on them.
///
/// One harness covers one session: its counters only grow, and a fresh
/// harness is the only way to start again from zero.
pub struct Harness<O: OutputSink = StdoutSink> {
    config: HarnessConfig,
    colours: bool,
    tally: Tally,
    out: O,
}

impl Harness<StdoutSink> {
    /// Creates a harness that reports to standard output.
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_output(config, StdoutSink)
    }
}

impl Default for Harness<StdoutSink> {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl<O: OutputSink> Harness<O> {
    /// Creates a harness that reports to `out`.
    ///
    /// Colour is enabled only if requested and `out` is an interactive terminal.
    pub fn with_output(config: HarnessConfig, out: O) -> Self {
        let colours = config.use_colours && out.is_terminal();
        Self {
            config,
            colours,
            tally: Tally::default(),
            out,
        }
    }

    pub fn config(&self) -> HarnessConfig {
        self.config
    }

    pub fn colours_enabled(&self) -> bool {
        self.colours
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    /// Gives callers access to the sink for framing lines between suites.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn into_output(self) -> O {
        self.out
    }

    /// Apply the harness colour policy to `text`.
    pub fn colorize(&self, text: &str, style: Style) -> String {
        colorize(text, style, self.colours)
    }

    fn emit(&mut self, text: &str) {
        self.out.emit(text);
    }

    /// Runs one test and reports it.
    ///
    /// The subject's own failures are never propagated: they are reported and
    /// classified as [`TestResult::Error`].
    pub fn run_test<S: Subject + ?Sized>(
        &mut self,
        subject: &S,
        inputs: &[Value],
        expected: &Value,
        name: Option<&str>,
    ) -> TestResult {
        self.tally.total += 1;
        let test_id = match name.filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("Test #{}", self.tally.total),
        };

        let result = match invoke(subject, inputs) {
            Ok(actual) if actual == *expected => {
                self.report_pass(&test_id, inputs, expected, &actual);
                TestResult::Pass
            }
            Ok(actual) => {
                self.report_fail(&test_id, inputs, expected, &actual);
                TestResult::Fail
            }
            Err(failure) => {
                self.report_error(&test_id, inputs, expected, &failure);
                TestResult::Error
            }
        };
        self.tally.record(result);
        debug!(test = %test_id, ?result, "classified test");
        result
    }

    /// Runs a typed test case.
    pub fn run_case<S: Subject + ?Sized>(&mut self, subject: &S, case: &TestCase) -> TestResult {
        self.run_test(subject, &case.inputs, &case.expected, case.name.as_deref())
    }

    /// Runs every case in order and prints a summary.
    ///
    /// Malformed cases are reported and skipped without touching the counters.
    /// An empty suite prints a warning and changes nothing. Returns the
    /// harness counters after the suite.
    pub fn run_suite<S, I>(&mut self, subject: &S, cases: I) -> Tally
    where
        S: Subject + ?Sized,
        I: IntoIterator,
        I::Item: IntoTestCase,
    {
        let cases: Vec<I::Item> = cases.into_iter().collect();
        if cases.is_empty() {
            let warning = self.colorize("Warning: No test cases provided!", Style::Warning);
            self.emit(&warning);
            return self.tally;
        }

        debug!(subject = subject.name(), cases = cases.len(), "starting suite");
        let started = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let banner = self.colorize(&format!("Starting test suite at {}", started), Style::Header);
        self.emit(&banner);
        self.emit(&format!("Testing function: {}", subject.name()));
        self.emit("");

        for (index, raw) in cases.into_iter().enumerate() {
            match raw.into_test_case() {
                Ok(case) => {
                    self.run_case(subject, &case);
                }
                Err(reason) => {
                    debug!(index, %reason, "skipping malformed case");
                    let line = format!("Invalid test case format: {}", reason);
                    let line = self.colorize(&line, Style::Failure);
                    self.emit(&line);
                    self.emit("");
                }
            }
        }

        self.print_summary();
        self.tally
    }

    // =========================================================================
    // REPORTING AND OUTPUT
    // =========================================================================

    fn print_values(&mut self, inputs: &[Value], expected: &Value) {
        self.emit(&format!("  Input: {}", Value::format_list(inputs)));
        self.emit(&format!("  Expected: {}", expected));
    }

    fn report_pass(&mut self, test_id: &str, inputs: &[Value], expected: &Value, actual: &Value) {
        let status = self.colorize(&format!("✓ {} PASSED", test_id), Style::Success);
        self.emit(&status);
        self.print_values(inputs, expected);
        self.emit(&format!("  Actual: {}", actual));
        self.emit("");
    }

    fn report_fail(&mut self, test_id: &str, inputs: &[Value], expected: &Value, actual: &Value) {
        let status = self.colorize(&format!("✗ {} FAILED", test_id), Style::Failure);
        self.emit(&status);
        self.print_values(inputs, expected);
        self.emit(&format!("  Actual: {}", actual));
        if self.config.show_hints {
            let hint = hint(expected, actual);
            if !hint.is_empty() {
                let hint = self.colorize(&format!("  {}", hint), Style::Warning);
                self.emit(&hint);
            }
        }
        self.emit("");
    }

    fn report_error(&mut self, test_id: &str, inputs: &[Value], expected: &Value, failure: &Failure) {
        let how = if failure.panicked {
            "panicked"
        } else {
            "returned an error"
        };
        let status = self.colorize(&format!("✗ {} ERROR - function {}", test_id, how), Style::Failure);
        self.emit(&status);
        self.print_values(inputs, expected);
        self.emit(&format!("  Error: {}", failure.message));
        for cause in &failure.causes {
            self.emit(&format!("  Caused by: {}", cause));
        }
        self.emit("  Traceback:");
        for line in failure.trace.lines() {
            self.emit(&format!("    {}", line));
        }
        self.emit("");
    }

    fn print_summary(&mut self) {
        let tally = self.tally;
        let header = self.colorize("Test Suite Summary:", Style::Header);
        self.emit("");
        self.emit(&header);
        self.emit(&format!("Total tests: {}", tally.total));
        if tally.passed > 0 {
            let line = self.colorize(&format!("Passed: {}", tally.passed), Style::Success);
            self.emit(&line);
        }
        if tally.failed > 0 {
            let line = self.colorize(&format!("Failed: {}", tally.failed), Style::Failure);
            self.emit(&line);
        }
        if tally.errored > 0 {
            let line = self.colorize(&format!("Errors: {}", tally.errored), Style::Failure);
            self.emit(&line);
        }
        if let Some(rate) = tally.success_rate() {
            let style = if tally.passed == tally.total {
                Style::Success
            } else if rate >= 50.0 {
                Style::Warning
            } else {
                Style::Failure
            };
            let line = self.colorize(&format!("Success rate: {:.2}%", rate), style);
            self.emit(&line);
        }
    }
}
