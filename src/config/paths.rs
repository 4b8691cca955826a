//! XDG path resolution for orcx configuration files.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;
use crate::constants::{AGENTS_FILENAME, APP_NAME, CONFIG_DIR_ENV, CONFIG_FILENAME};

impl Config {
    /// Returns the configuration directory for orcx.
    ///
    /// `ORCX_CONFIG_DIR` wins when set; otherwise `~/.config/orcx/` on Linux
    /// (`XDG_CONFIG_HOME/orcx`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to `config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Returns the full path to the agent registry file, `agents.toml`.
    pub fn agents_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(AGENTS_FILENAME))
    }
}
