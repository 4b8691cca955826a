//! The `orcx agents` command.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::registry::{AgentConfig, AgentRegistry};

/// Prints every configured agent, or a hint when there are none.
pub(super) fn list_agents() -> Result<()> {
    let registry = AgentRegistry::load()?;

    if registry.is_empty() {
        println!("No agents configured.");
        println!("Add agents to: {}", Config::agents_path()?.display());
        return Ok(());
    }

    for name in registry.list_names() {
        if let Some(agent) = registry.get(name) {
            println!("{}", describe(agent));
            if !agent.fallback_models.is_empty() {
                println!(
                    "  {} {}",
                    "fallbacks:".dimmed(),
                    agent.fallback_models.join(", ")
                );
            }
        }
    }
    Ok(())
}

/// One-line summary: `name: model - description`.
fn describe(agent: &AgentConfig) -> String {
    let desc = agent
        .description
        .as_deref()
        .map(|d| format!(" - {d}"))
        .unwrap_or_default();
    format!("{}: {}{}", agent.name.bold(), agent.model, desc)
}
