//! Provider kind enumeration and model id splitting.
//!
//! Defines [`ProviderKind`] which identifies which LLM backend serves a model
//! id, based on the id's first segment.

use anyhow::{anyhow, Result};

/// Identifies which LLM provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Anthropic (Claude models).
    Anthropic,
    /// OpenAI (GPT models).
    OpenAI,
    /// OpenRouter (multi-provider gateway, honours provider preferences).
    OpenRouter,
    /// Ollama (local models via OpenAI-compatible API).
    Ollama,
    /// DeepSeek.
    DeepSeek,
    /// Google Gemini, addressed as `google/<model>`.
    Gemini,
    /// Mistral AI.
    Mistral,
    /// Groq.
    Groq,
    /// Together AI.
    Together,
}

impl ProviderKind {
    /// Parses a provider name string into a [`ProviderKind`].
    ///
    /// Matching is case-insensitive. Returns an error for unknown providers.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAI),
            "openrouter" => Ok(Self::OpenRouter),
            "ollama" => Ok(Self::Ollama),
            "deepseek" => Ok(Self::DeepSeek),
            "google" | "gemini" => Ok(Self::Gemini),
            "mistral" => Ok(Self::Mistral),
            "groq" => Ok(Self::Groq),
            "together" => Ok(Self::Together),
            other => Err(anyhow!(
                "Unknown provider: {other}. Supported: anthropic, openai, openrouter, ollama, \
                 deepseek, google, mistral, groq, together \
                 (other vendors are reachable as openrouter/<vendor>/<model>)"
            )),
        }
    }

    /// Name used in config tables and `<NAME>_API_KEY` variables.
    pub fn name(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAI => "openai",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
            Self::DeepSeek => "deepseek",
            Self::Gemini => "google",
            Self::Mistral => "mistral",
            Self::Groq => "groq",
            Self::Together => "together",
        }
    }

    /// Whether the backend understands the `provider` routing block.
    pub fn honours_routing(self) -> bool {
        matches!(self, Self::OpenRouter)
    }

    /// Max-token value to send when the request has none, for backends that require one.
    pub fn required_max_tokens(self) -> Option<u64> {
        match self {
            Self::Anthropic => Some(crate::constants::REQUIRED_MAX_TOKENS_DEFAULT),
            _ => None,
        }
    }
}

/// Splits a validated `provider/model[/...]` id into its backend and the
/// model name that backend expects.
pub fn split_model_id(model: &str) -> Result<(ProviderKind, &str)> {
    let (provider, rest) = model
        .split_once(crate::router::SEPARATOR)
        .ok_or_else(|| anyhow!("Model id {model:?} has no provider prefix"))?;
    Ok((ProviderKind::from_str(provider)?, rest))
}
