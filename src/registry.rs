//! Agent presets and the registry that holds them.
//!
//! Agents live in `agents.toml`, one `[agents.<name>]` table each; the table
//! key becomes the agent's name.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::router::ProviderPrefs;

/// A named preset bundling a model with prompt and routing defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Filled from the table key when loading.
    #[serde(default, skip_serializing)]
    pub name: String,
    /// `provider/model` id, or an alias for one.
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Informational list of alternative models; never tried automatically.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_prefs: Option<ProviderPrefs>,
}

/// On-disk shape of `agents.toml`.
#[derive(Debug, Default, Deserialize)]
struct AgentsFile {
    #[serde(default)]
    agents: BTreeMap<String, AgentConfig>,
}

/// Collection of configured agents, keyed by unique name.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, AgentConfig>,
}

impl AgentRegistry {
    /// Builds a registry from agents, keyed by their `name`.
    #[cfg(test)]
    pub fn from_agents(agents: impl IntoIterator<Item = AgentConfig>) -> Self {
        Self {
            agents: agents
                .into_iter()
                .map(|agent| (agent.name.clone(), agent))
                .collect(),
        }
    }

    /// Loads the registry from a TOML file, returning an empty registry when missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "agents file not found, registry is empty");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read agents from {:?}", path))?;
        let file: AgentsFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse agents at {:?}", path))?;

        let mut agents = BTreeMap::new();
        for (name, mut agent) in file.agents {
            if let Some(prefs) = &agent.provider_prefs {
                prefs
                    .validate()
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Invalid provider_prefs for agent {name:?}"))?;
            }
            agent.name = name.clone();
            agents.insert(name, agent);
        }
        debug!(count = agents.len(), "loaded agent registry");
        Ok(Self { agents })
    }

    /// Loads the registry from the default `agents.toml` location.
    pub fn load() -> Result<Self> {
        Self::load_from(&crate::config::Config::agents_path()?)
    }

    pub fn get(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.get(name)
    }

    /// Agent names in alphabetical order.
    pub fn list_names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
