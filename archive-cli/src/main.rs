//! Binary crate for the `weather-archive` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Collecting the query fields, from flags or prompts
//! - Rendering the loading / error / table states

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

mod cli;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();

    let default_filter = if cmd.verbose { "archive_core=debug,archive_cli=debug" } else { "off" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    cmd.run().await
}
