//! Model id handling: alias expansion, format validation and provider extraction.
//!
//! A model id is `provider/model`, optionally with further segments
//! (`openrouter/deepseek/deepseek-v3.2`). Only the first and last segments
//! are required to be non-empty.

use std::collections::BTreeMap;

use crate::error::RouteError;

/// Separator between the provider and model segments.
pub const SEPARATOR: char = '/';

/// Returned by [`extract_provider`] for ids with no separator.
pub const UNKNOWN_PROVIDER: &str = "unknown";

/// Expands `name` through the alias table, returning it unchanged when no alias matches.
pub fn expand_alias(name: &str, aliases: &BTreeMap<String, String>) -> String {
    aliases
        .get(name)
        .cloned()
        .unwrap_or_else(|| name.to_string())
}

/// Checks that `model` has the `provider/model[/...]` shape.
pub fn validate(model: &str) -> Result<(), RouteError> {
    let (Some(first), Some(last)) = (model.find(SEPARATOR), model.rfind(SEPARATOR)) else {
        return Err(RouteError::InvalidModelFormat(model.to_string()));
    };
    if model[..first].is_empty() || model[last + 1..].is_empty() {
        return Err(RouteError::InvalidModelFormat(model.to_string()));
    }
    Ok(())
}

/// Returns the segment before the first separator, or `"unknown"`.
pub fn extract_provider(model: &str) -> &str {
    model
        .split_once(SEPARATOR)
        .map(|(provider, _)| provider)
        .unwrap_or(UNKNOWN_PROVIDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("ds".to_string(), "openrouter/deepseek/deepseek-v3.2".to_string()),
            ("claude".to_string(), "anthropic/claude-sonnet-4".to_string()),
        ])
    }

    #[test]
    fn extracts_provider_from_slash_format() {
        assert_eq!(extract_provider("openrouter/deepseek/deepseek-v3.2"), "openrouter");
        assert_eq!(extract_provider("anthropic/claude-sonnet-4"), "anthropic");
        assert_eq!(extract_provider("openai/gpt-4o"), "openai");
    }

    #[test]
    fn unknown_provider_without_separator() {
        assert_eq!(extract_provider("gpt-4o"), UNKNOWN_PROVIDER);
        assert_eq!(extract_provider(""), UNKNOWN_PROVIDER);
    }

    #[test]
    fn accepts_two_and_multi_part_ids() {
        assert!(validate("openai/gpt-4o").is_ok());
        assert!(validate("anthropic/claude-sonnet-4").is_ok());
        assert!(validate("openrouter/deepseek/deepseek-v3.2").is_ok());
    }

    #[test]
    fn rejects_missing_separator() {
        let err = validate("gpt-4o").unwrap_err();
        assert_eq!(err, RouteError::InvalidModelFormat("gpt-4o".into()));
        assert!(err.to_string().contains("gpt-4o"));
    }

    #[test]
    fn rejects_empty_provider_or_model() {
        assert!(matches!(validate("/gpt-4o"), Err(RouteError::InvalidModelFormat(_))));
        assert!(matches!(validate("openai/"), Err(RouteError::InvalidModelFormat(_))));
        assert!(matches!(validate("openrouter/deepseek/"), Err(RouteError::InvalidModelFormat(_))));
        assert!(matches!(validate("/"), Err(RouteError::InvalidModelFormat(_))));
    }

    #[test]
    fn only_outer_segments_are_checked() {
        assert!(validate("openrouter//deepseek-v3.2").is_ok());
    }

    #[test]
    fn expands_configured_alias() {
        assert_eq!(expand_alias("ds", &aliases()), "openrouter/deepseek/deepseek-v3.2");
        assert_eq!(expand_alias("claude", &aliases()), "anthropic/claude-sonnet-4");
    }

    #[test]
    fn leaves_unaliased_names_unchanged() {
        assert_eq!(expand_alias("openai/gpt-4o", &aliases()), "openai/gpt-4o");
        let empty = BTreeMap::new();
        assert_eq!(expand_alias("ds", &empty), "ds");
        assert_eq!(expand_alias("", &empty), "");
    }
}
