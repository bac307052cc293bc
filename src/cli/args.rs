//! Defines the command-line arguments and subcommands for the Testbench CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "testbench",
    version,
    about = "Run example-based tests against small functions and explain the failures."
)]
pub struct TestbenchArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Reporting options shared by every subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Do not print hints for failed tests.
    #[arg(long, global = true)]
    pub no_hints: bool,

    /// Never colour the output, even on a terminal.
    #[arg(long, global = true, visible_alias = "no-color")]
    pub no_colour: bool,

    /// Exit with a non-zero status when any test fails or errors.
    #[arg(long, global = true)]
    pub strict: bool,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the default suites of the built-in functions.
    Demo {
        /// Only run the suite of this function.
        function: Option<String>,
    },
    /// Run suites loaded from YAML or JSON files.
    Run {
        /// The suite files to run, in order.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the built-in functions.
    List,
}
