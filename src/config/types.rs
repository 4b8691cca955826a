//! Struct definitions for orcx configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::router::ProviderPrefs;

/// Root configuration for orcx, deserialized from `config.toml`.
///
/// Every field defaults, so a missing or empty file is a valid config.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Model used when neither `--model` nor `--agent` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    /// Agent used when no model or agent is requested and no default model is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,
    /// Short names expanding to full `provider/model` ids.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
    /// Global provider routing preferences, merged under each agent's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_prefs: Option<ProviderPrefs>,
    /// Per-provider connection settings keyed by provider name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub providers: BTreeMap<String, ProviderEntry>,
}

/// Connection details for a single LLM provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderEntry {
    /// API key for authentication. `<PROVIDER>_API_KEY` in the environment takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (proxies, self-hosted instances).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}
