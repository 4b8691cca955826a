//! Environment variable substitution and API key resolution.

use super::types::Config;

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        for value in [&mut self.default_model, &mut self.default_agent]
            .into_iter()
            .flatten()
        {
            *value = Self::resolve_str(value);
        }
        for target in self.aliases.values_mut() {
            *target = Self::resolve_str(target);
        }
        for entry in self.providers.values_mut() {
            if let Some(ref mut key) = entry.api_key {
                *key = Self::resolve_str(key);
            }
            if let Some(ref mut url) = entry.base_url {
                *url = Self::resolve_str(url);
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    ///
    /// Single left-to-right pass: substituted values are not rescanned.
    fn resolve_str(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find("{env:") {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            result.push_str(&rest[..start]);
            let var_name = &rest[start + 5..start + len];
            result.push_str(&std::env::var(var_name).unwrap_or_default());
            rest = &rest[start + len + 1..];
        }
        result.push_str(rest);
        result
    }

    /// Resolve API key for a provider: env var first, then config value.
    ///
    /// Empty values on either side count as unset.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        // OPENAI_API_KEY, ANTHROPIC_API_KEY, etc.
        let env_key = format!("{}_API_KEY", provider.to_uppercase());
        if let Ok(val) = std::env::var(&env_key) {
            if !val.is_empty() {
                return Some(val);
            }
        }

        self.providers
            .get(provider)
            .and_then(|e| e.api_key.clone())
            .filter(|key| !key.is_empty())
    }

    /// Base URL override for a provider, if configured.
    pub fn base_url(&self, provider: &str) -> Option<&str> {
        self.providers
            .get(provider)
            .and_then(|e| e.base_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
