//! Main entry point for the tokenstamp CLI

use clap::Parser;
use std::process::ExitCode;
use tokenstamp_cli::{Cli, run};
use tokenstamp_common::LoggingTransformer;

fn main() -> anyhow::Result<ExitCode> {
    LoggingTransformer::init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    let success = run(cli, &mut stdout)?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
