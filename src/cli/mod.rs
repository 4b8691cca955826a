//! Command-line interface definition and dispatch for orcx.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand is
//! routed to its handler; prompt execution lives in the [`run`](self::run)
//! submodule.

mod agents;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config;

/// Top-level CLI structure for orcx.
#[derive(Parser)]
#[command(
    name = "orcx",
    version,
    about = "LLM orchestrator - route prompts to any model"
)]
pub struct Cli {
    /// Verbose logging and full error chains
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the orcx CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a prompt against an agent or model
    Run(RunArgs),
    /// List configured agents
    Agents,
    /// List common models and the model id format
    Models,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `orcx run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Prompt to send (read from stdin when omitted)
    pub prompt: Vec<String>,
    /// Agent preset to use
    #[arg(short, long)]
    pub agent: Option<String>,
    /// Model to use directly (provider/model or an alias)
    #[arg(short, long)]
    pub model: Option<String>,
    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,
    /// Context to send ahead of the prompt
    #[arg(long)]
    pub context: Option<String>,
    /// Files to append to the context
    #[arg(short, long = "file")]
    pub files: Vec<PathBuf>,
    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u64>,
    /// Sampling temperature
    #[arg(short, long)]
    pub temperature: Option<f64>,
    /// Disable streaming
    #[arg(long)]
    pub no_stream: bool,
    /// Output the response as JSON (implies --no-stream)
    #[arg(short, long)]
    pub json: bool,
    /// Print the resolved request parameters instead of calling the model
    #[arg(long)]
    pub dry_run: bool,
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective config (API keys masked)
    Show,
    /// Print config and agents file locations
    Path,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run::handle_run(args).await,
        Commands::Agents => agents::list_agents(),
        Commands::Models => {
            let config = config::Config::load()?;
            crate::provider::list_models(&config).await
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let config = config::Config::load()?;
                    let path = config::Config::config_path()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    println!();
                    let toml_str = toml::to_string_pretty(&config.redacted())?;
                    println!("{}", toml_str);
                }
                ConfigAction::Path => {
                    println!("{} {}", "config:".bold(), config::Config::config_path()?.display());
                    println!("{} {}", "agents:".bold(), config::Config::agents_path()?.display());
                }
            }
            Ok(())
        }
    }
}
