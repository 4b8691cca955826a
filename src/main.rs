//! Entry point for orcx, a prompt router for LLM providers.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! installs logging and dispatches to the appropriate subcommand handler.
//! Failures are mapped to exit codes by [`error::report`].

mod cli;
mod config;
mod constants;
mod error;
mod logging;
mod message;
mod models;
mod output;
mod provider;
mod registry;
mod request;
mod router;

use std::process::ExitCode;

/// Runs the orcx CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    let debug = cli.debug;
    logging::init(debug);

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => error::report(&err, debug),
    }
}
