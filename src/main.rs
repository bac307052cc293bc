//! Testbench CLI entry point

use clap::Parser;
use std::process::ExitCode;
use testbench::cli::{self, args::TestbenchArgs};

fn main() -> ExitCode {
    // Diagnostics go to stderr so they never mix with the report on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let args = TestbenchArgs::parse();
    match cli::run(&args) {
        Ok(tally) if args.report.strict && tally.has_failures() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(2)
        }
    }
}
