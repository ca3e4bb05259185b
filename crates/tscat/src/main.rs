//! Main entry point for tscat.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tscat::{run, Cli, Outcome};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = io::stdout();

    match run(&cli, &mut stdout.lock()).context("tscat failed") {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::IssuesFound) => ExitCode::from(1),
        Err(e) => {
            if tracing::dispatcher::has_been_set() {
                error!("{:#}", e);
            } else {
                eprintln!("{e:#}");
            }
            ExitCode::from(2)
        }
    }
}
