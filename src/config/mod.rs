//! Configuration types and loading for orcx.
//!
//! Orcx stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/orcx/config.toml` on Linux). A project-level `orcx.toml`
//! overlays the global file.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
#[allow(unused_imports)]
pub use types::ProviderEntry;

use anyhow::Result;

impl Config {
    /// Load config with precedence: project > global > defaults.
    pub fn load() -> Result<Self> {
        let global = Self::load_from(&Self::config_path()?)?;
        let project = Self::load_project(&std::env::current_dir()?)?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions();
        Ok(config)
    }

    /// Copy of this config with every API key replaced by a mask, for display.
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        for entry in shown.providers.values_mut() {
            if entry.api_key.is_some() {
                entry.api_key = Some("********".to_string());
            }
        }
        shown
    }
}
