//! # drnekin: Workshop Customer Records
//!
//! Command-line front end over the customer/visit store.
//!
//! ```text
//! drnekin customer add --name Ada --plate 34ABC
//! drnekin visit add abcdEFGH --km 120500 --op "Oil change=100"
//! drnekin customer show abcdEFGH
//! ```
//!
//! Logs go to stderr (filter with `RUST_LOG`); records go to stdout.

mod cli;
mod commands;
mod error;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use drnekin_config::ConfigStore;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let store = ConfigStore::from_env();
    let mut stdout = io::stdout().lock();

    match commands::run(cli, store, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,drnekin_cli=info,drnekin_db=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
