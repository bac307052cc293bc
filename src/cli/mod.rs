//! The Testbench Command-Line Interface.
//!
//! This module dispatches CLI commands to the harness. All suites in one
//! invocation share a single harness, so the final summary covers every suite.

use crate::cli::args::{Command, ReportArgs, TestbenchArgs};
use crate::demos::{self, DEMOS};
use crate::suite::{load_suite, SuiteError};
use crate::test_harness::{Harness, HarnessConfig, Tally};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

pub mod args;
pub mod output;

use output::OutputSink;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Suite(#[from] SuiteError),

    #[error("unknown function `{name}`{}", in_file(.file))]
    #[diagnostic(
        code(testbench::unknown_function),
        help("run `testbench list` to see the built-in functions")
    )]
    UnknownFunction {
        name: String,
        /// Suite file that named the function, if any.
        file: Option<PathBuf>,
    },
}

fn in_file(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map(|path| format!(" in {}", path.display()))
        .unwrap_or_default()
}

impl From<&ReportArgs> for HarnessConfig {
    fn from(args: &ReportArgs) -> Self {
        Self {
            show_hints: !args.no_hints,
            use_colours: !args.no_colour,
        }
    }
}

/// Runs the parsed command against `harness`, returning the final counters.
pub fn run_with<O: OutputSink>(args: &TestbenchArgs, harness: &mut Harness<O>) -> Result<Tally, CliError> {
    match &args.command {
        Command::Demo { function } => run_demos(function.as_deref(), harness),
        Command::Run { files } => run_files(files, harness),
        Command::List => {
            list(harness);
            Ok(harness.tally())
        }
    }
}

/// The main entry point for the CLI: reports to stdout.
pub fn run(args: &TestbenchArgs) -> Result<Tally, CliError> {
    let mut harness = Harness::new(HarnessConfig::from(&args.report));
    run_with(args, &mut harness)
}

fn run_demos<O: OutputSink>(only: Option<&str>, harness: &mut Harness<O>) -> Result<Tally, CliError> {
    let selected: Vec<&demos::Demo> = match only {
        Some(name) => vec![demos::find(name).ok_or_else(|| CliError::UnknownFunction {
            name: name.to_string(),
            file: None,
        })?],
        None => DEMOS.iter().collect(),
    };

    for demo in selected {
        info!(function = demo.name, "running demo suite");
        let heading = harness.colorize(&format!("Testing {} function:", demo.name), output::Style::Header);
        emit(harness, &heading);
        harness.run_suite(demo, demo.cases());
        emit(harness, "");
    }
    Ok(harness.tally())
}

fn run_files<O: OutputSink>(files: &[PathBuf], harness: &mut Harness<O>) -> Result<Tally, CliError> {
    for path in files {
        let suite = load_suite(path)?;
        let demo = demos::find(&suite.function).ok_or_else(|| CliError::UnknownFunction {
            name: suite.function.clone(),
            file: Some(path.clone()),
        })?;
        info!(path = %path.display(), function = demo.name, "running suite file");
        emit(harness, &format!("Suite file: {}", path.display()));
        harness.run_suite(demo, suite.cases);
        emit(harness, "");
    }
    Ok(harness.tally())
}

fn list<O: OutputSink>(harness: &mut Harness<O>) {
    for demo in &DEMOS {
        emit(harness, &format!("{:<24}{}", demo.name, demo.description));
    }
}

fn emit<O: OutputSink>(harness: &mut Harness<O>, text: &str) {
    harness.output_mut().emit(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::OutputBuffer;
    use clap::Parser;

    fn run_args(argv: &[&str]) -> (Result<Tally, CliError>, String) {
        let args = TestbenchArgs::parse_from(argv);
        let mut harness = Harness::with_output(HarnessConfig::from(&args.report), OutputBuffer::new());
        let result = run_with(&args, &mut harness);
        (result, harness.into_output().buffer)
    }

    #[test]
    fn demo_runs_every_builtin() {
        let (result, out) = run_args(&["testbench", "demo"]);
        let tally = result.unwrap();
        let cases: usize = DEMOS.iter().map(|d| d.cases().len()).sum();
        assert_eq!(tally.total, cases);
        for demo in &DEMOS {
            assert!(out.contains(&format!("Testing function: {}", demo.name)));
        }
    }

    #[test]
    fn demo_can_select_one_function() {
        let (result, out) = run_args(&["testbench", "demo", "count_vowels"]);
        assert_eq!(result.unwrap().passed, 4);
        assert!(!out.contains("add_numbers"));
    }

    #[test]
    fn unknown_demo_is_an_error() {
        let (result, _) = run_args(&["testbench", "demo", "nope"]);
        assert!(matches!(result, Err(CliError::UnknownFunction { ref name, file: None }) if name == "nope"));
    }

    #[test]
    fn unknown_function_names_its_suite_file() {
        let (result, _) = run_args(&["testbench", "run", "tests/suites/unknown.yaml"]);
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown function `does_not_exist` in tests/suites/unknown.yaml"
        );

        let (result, _) = run_args(&["testbench", "demo", "nope"]);
        assert_eq!(result.unwrap_err().to_string(), "unknown function `nope`");
    }

    #[test]
    fn flags_map_to_config() {
        let args = TestbenchArgs::parse_from(["testbench", "--no-hints", "--no-color", "list"]);
        let config = HarnessConfig::from(&args.report);
        assert!(!config.show_hints);
        assert!(!config.use_colours);
        assert!(!args.report.strict);
    }

    #[test]
    fn list_names_every_function() {
        let (result, out) = run_args(&["testbench", "list"]);
        assert_eq!(result.unwrap().total, 0);
        assert!(out.contains("celsius_to_fahrenheit"));
    }
}
