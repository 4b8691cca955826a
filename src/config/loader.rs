//! File loading and merging for orcx configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::Config;

impl Config {
    /// Loads a config file, returning defaults when the file does not exist.
    ///
    /// An empty file is valid and also yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        config.validate(path)?;
        Ok(config)
    }

    /// Look for `orcx.toml` in `start`, then walk up to the git root.
    pub(super) fn load_project(start: &Path) -> Result<Option<Config>> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                debug!(path = %candidate.display(), "found project config");
                return Self::load_from(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Merge project config over global config.
    /// Project values win when present; tables are unioned key by key.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        let mut aliases = global.aliases;
        aliases.extend(project.aliases);
        let mut providers = global.providers;
        providers.extend(project.providers);

        Config {
            default_model: project.default_model.or(global.default_model),
            default_agent: project.default_agent.or(global.default_agent),
            aliases,
            provider_prefs: project.provider_prefs.or(global.provider_prefs),
            providers,
        }
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(prefs) = &self.provider_prefs {
            prefs
                .validate()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid provider_prefs in {:?}", path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderEntry;
    use crate::router::ProviderPrefs;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.default_model.is_none());
        assert!(config.default_agent.is_none());
    }

    #[test]
    fn empty_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn parses_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "config.toml",
            r#"
default_model = "openai/gpt-4o"
default_agent = "my-agent"

[aliases]
ds = "openrouter/deepseek/deepseek-v3.2"

[provider_prefs]
min_bits = 8
ignore = ["Azure"]
sort = "price"

[providers.openai]
api_key = "sk-test-key-from-file"
"#,
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("openai/gpt-4o"));
        assert_eq!(config.default_agent.as_deref(), Some("my-agent"));
        assert_eq!(
            config.aliases.get("ds").map(String::as_str),
            Some("openrouter/deepseek/deepseek-v3.2")
        );
        let prefs = config.provider_prefs.unwrap();
        assert_eq!(prefs.min_bits, Some(8));
        assert_eq!(prefs.ignore, vec!["Azure".to_string()]);
        assert_eq!(prefs.sort.as_deref(), Some("price"));
        assert_eq!(
            config.providers["openai"].api_key.as_deref(),
            Some("sk-test-key-from-file")
        );
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "default_model = [");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("config.toml"));
    }

    #[test]
    fn rejects_min_bits_outside_tiers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[provider_prefs]\nmin_bits = 10\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("min_bits = 10"));
    }

    #[test]
    fn rejects_unknown_preference_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[provider_prefs]\nminbits = 8\n");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn project_values_win_and_tables_union() {
        let global = Config {
            default_model: Some("openai/gpt-4o".into()),
            default_agent: Some("reviewer".into()),
            aliases: [
                ("ds".to_string(), "openrouter/deepseek/deepseek-v3.2".to_string()),
                ("fast".to_string(), "openai/gpt-4o-mini".to_string()),
            ]
            .into(),
            provider_prefs: Some(ProviderPrefs {
                sort: Some("price".into()),
                ..Default::default()
            }),
            providers: [(
                "openai".to_string(),
                ProviderEntry {
                    api_key: Some("global-key".into()),
                    base_url: None,
                },
            )]
            .into(),
        };
        let project = Config {
            default_model: Some("anthropic/claude-sonnet-4".into()),
            aliases: [("fast".to_string(), "anthropic/claude-haiku-4".to_string())].into(),
            provider_prefs: Some(ProviderPrefs {
                min_bits: Some(16),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = Config::merge(global, project);
        assert_eq!(merged.default_model.as_deref(), Some("anthropic/claude-sonnet-4"));
        assert_eq!(merged.default_agent.as_deref(), Some("reviewer"));
        assert_eq!(merged.aliases["fast"], "anthropic/claude-haiku-4");
        assert_eq!(merged.aliases["ds"], "openrouter/deepseek/deepseek-v3.2");
        let prefs = merged.provider_prefs.unwrap();
        assert_eq!(prefs.min_bits, Some(16));
        assert_eq!(prefs.sort, None);
        assert_eq!(merged.providers["openai"].api_key.as_deref(), Some("global-key"));
    }

    #[test]
    fn finds_project_config_in_parent_until_git_root() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        write(root.path(), "orcx.toml", "default_model = \"openai/gpt-4o\"\n");
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let project = Config::load_project(&nested).unwrap().unwrap();
        assert_eq!(project.default_model.as_deref(), Some("openai/gpt-4o"));
    }

    #[test]
    fn project_search_stops_at_git_root() {
        let outer = tempfile::tempdir().unwrap();
        write(outer.path(), "orcx.toml", "default_model = \"openai/gpt-4o\"\n");
        let repo = outer.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(Config::load_project(&repo).unwrap().is_none());
    }
}
