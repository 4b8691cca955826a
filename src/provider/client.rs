//! LLM provider client and streaming implementation.
//!
//! Contains the [`Provider`] struct which wraps rig-core provider clients
//! behind enum dispatch and executes a [`CompletionParams`] against them.

use anyhow::{Context, Result};
use futures::StreamExt;
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::completion::Chat;
use rig::message::{Message as RigMessage, Text};
use rig::providers::{anthropic, deepseek, gemini, groq, mistral, openai, openrouter, together};
use rig::streaming::{StreamedAssistantContent, StreamingChat};
use tracing::{debug, info};

use super::kind::{split_model_id, ProviderKind};
use crate::config::Config;
use crate::message::{Message, Role};
use crate::output::Renderer;
use crate::router::{CompletionParams, ExtraBody};

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    Anthropic(anthropic::Client),
    OpenAI(openai::Client),
    OpenRouter(openrouter::Client),
    Ollama(openai::Client),
    DeepSeek(deepseek::Client),
    Gemini(gemini::Client),
    Mistral(mistral::Client),
    Groq(groq::Client),
    Together(together::Client),
}

/// A configured LLM provider ready to execute completion parameters.
///
/// Agents are built per call since each call may carry different
/// preambles, sampling settings and routing parameters.
pub struct Provider {
    client: ClientKind,
    kind: ProviderKind,
    model: String,
}

/// Completion parameters reshaped for rig-core's agent API.
struct Call {
    preamble: Option<String>,
    prompt: String,
    history: Vec<RigMessage>,
    max_tokens: Option<u64>,
    temperature: Option<f64>,
    additional_params: Option<serde_json::Value>,
}

/// Builds an agent from the given client, model and [`Call`] settings, then
/// executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $call:expr, |$agent:ident| $body:expr) => {{
        let mut builder = $client.agent($model);
        if let Some(sys) = $call.preamble.as_deref() {
            builder = builder.preamble(sys);
        }
        if let Some(max_tokens) = $call.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = $call.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(params) = $call.additional_params.clone() {
            builder = builder.additional_params(params);
        }
        let $agent = builder.build();
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::Anthropic($client) => $body,
            ClientKind::OpenAI($client) => $body,
            ClientKind::OpenRouter($client) => $body,
            ClientKind::Ollama($client) => $body,
            ClientKind::DeepSeek($client) => $body,
            ClientKind::Gemini($client) => $body,
            ClientKind::Mistral($client) => $body,
            ClientKind::Groq($client) => $body,
            ClientKind::Together($client) => $body,
        }
    };
}

/// Processes a streaming response, rendering tokens and accumulating the full text.
macro_rules! process_stream {
    ($stream:expr, $renderer:expr, $full_response:expr) => {
        while let Some(chunk) = $stream.next().await {
            match chunk {
                Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                    Text { text },
                ))) => {
                    $renderer.render_token(&text);
                    $full_response.push_str(&text);
                }
                Ok(MultiTurnStreamItem::FinalResponse(_)) => {
                    // Stream complete
                }
                Err(err) => {
                    $renderer.render_error(&err.to_string());
                    anyhow::bail!("Streaming error: {}", err);
                }
                _ => {
                    // Reasoning and other non-text items are not relayed
                }
            }
        }
    };
}

impl Provider {
    /// Creates a [`Provider`] for a resolved `provider/model` id.
    ///
    /// Resolves the API key through the config precedence chain
    /// (env var, then config file) and builds the matching client.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported provider prefixes, when no API key is
    /// found for a hosted provider, or if client construction fails.
    pub fn from_config(config: &Config, model_id: &str) -> Result<Self> {
        let (kind, model) = split_model_id(model_id)?;
        let api_key = || {
            config.resolve_api_key(kind.name()).with_context(|| {
                format!(
                    "No API key found for {0}. Set {1}_API_KEY or add api_key under [providers.{0}] in config.toml",
                    kind.name(),
                    kind.name().to_uppercase()
                )
            })
        };

        let client = match kind {
            ProviderKind::Anthropic => ClientKind::Anthropic(
                anthropic::Client::new(&api_key()?).context("Failed to create Anthropic client")?,
            ),
            ProviderKind::OpenAI => {
                let key = api_key()?;
                let client = match config.base_url(kind.name()) {
                    Some(base_url) => openai::Client::builder()
                        .api_key(&key)
                        .base_url(base_url.to_string())
                        .build()
                        .context("Failed to create OpenAI client")?,
                    None => openai::Client::new(&key).context("Failed to create OpenAI client")?,
                };
                ClientKind::OpenAI(client)
            }
            ProviderKind::OpenRouter => ClientKind::OpenRouter(
                openrouter::Client::new(&api_key()?)
                    .context("Failed to create OpenRouter client")?,
            ),
            ProviderKind::Ollama => {
                let base_url = config
                    .base_url(kind.name())
                    .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);
                let client = openai::Client::builder()
                    .api_key("ollama")
                    .base_url(format!("{}/v1", base_url))
                    .build()
                    .context("Failed to create Ollama client")?;
                ClientKind::Ollama(client)
            }
            ProviderKind::DeepSeek => ClientKind::DeepSeek(
                deepseek::Client::new(&api_key()?).context("Failed to create DeepSeek client")?,
            ),
            ProviderKind::Gemini => ClientKind::Gemini(
                gemini::Client::new(&api_key()?).context("Failed to create Gemini client")?,
            ),
            ProviderKind::Mistral => ClientKind::Mistral(
                mistral::Client::new(&api_key()?).context("Failed to create Mistral client")?,
            ),
            ProviderKind::Groq => ClientKind::Groq(
                groq::Client::new(&api_key()?).context("Failed to create Groq client")?,
            ),
            ProviderKind::Together => ClientKind::Together(
                together::Client::new(&api_key()?).context("Failed to create Together client")?,
            ),
        };

        debug!(provider = kind.name(), model, "created provider client");
        Ok(Self {
            client,
            kind,
            model: model.to_string(),
        })
    }

    /// Sends the conversation and returns the full response text.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM API call fails (network error,
    /// invalid key, rate limit, etc.).
    pub async fn complete(&self, params: &CompletionParams) -> Result<String> {
        let call = self.prepare_call(params)?;
        info!(provider = self.kind.name(), model = %self.model, "sending completion request");
        let response = dispatch!(self, |client| {
            with_agent!(client, &self.model, call, |agent| {
                agent
                    .chat(call.prompt.clone(), call.history.clone())
                    .await
                    .context("LLM API call failed")?
            })
        });
        Ok(response)
    }

    /// Streams the response, relaying text fragments to `renderer` as they arrive.
    ///
    /// Returns the full accumulated response text.
    ///
    /// # Errors
    ///
    /// Returns an error if a streaming chunk fails (network error, invalid key, etc.).
    pub async fn stream(
        &self,
        params: &CompletionParams,
        renderer: &mut dyn Renderer,
    ) -> Result<String> {
        let call = self.prepare_call(params)?;
        info!(provider = self.kind.name(), model = %self.model, "opening completion stream");
        let mut full_response = String::new();

        dispatch!(self, |client| {
            let mut stream = with_agent!(client, &self.model, call, |agent| {
                agent
                    .stream_chat(call.prompt.clone(), call.history.clone())
                    .await
            });
            process_stream!(stream, renderer, full_response);
        });

        renderer.render_done();
        Ok(full_response)
    }

    /// Reshapes params for rig-core: the leading system message becomes the
    /// preamble, the last message the prompt, and the rest chat history.
    fn prepare_call(&self, params: &CompletionParams) -> Result<Call> {
        let mut messages: &[Message] = &params.messages;

        let preamble = match messages.first() {
            Some(first) if first.role == Role::System => {
                messages = &messages[1..];
                Some(first.text().to_string())
            }
            _ => None,
        };

        let (prompt, history) = match messages.split_last() {
            Some((last, earlier)) => (last.text().to_string(), earlier),
            None => (String::new(), messages),
        };

        let history = history
            .iter()
            .map(|m| match m.role {
                Role::Assistant => RigMessage::assistant(m.text()),
                Role::User | Role::System => RigMessage::user(m.text()),
            })
            .collect();

        let additional_params = routing_params(self.kind, params.extra_body.as_ref())?;

        Ok(Call {
            preamble,
            prompt,
            history,
            max_tokens: params.max_tokens.or(self.kind.required_max_tokens()),
            temperature: params.temperature,
            additional_params,
        })
    }
}

/// Serializes the routing block for backends that understand it.
///
/// Other backends get `None`; the preferences are dropped with a debug log.
fn routing_params(kind: ProviderKind, extra_body: Option<&ExtraBody>) -> Result<Option<serde_json::Value>> {
    let Some(extra) = extra_body else {
        return Ok(None);
    };
    if !kind.honours_routing() {
        debug!(
            provider = kind.name(),
            "provider preferences ignored: backend has no routing support"
        );
        return Ok(None);
    }
    let value = serde_json::to_value(extra).context("Failed to serialize provider routing block")?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::ProviderRouting;

    fn extra_body() -> ExtraBody {
        ExtraBody {
            provider: ProviderRouting {
                only: vec!["DeepInfra".into()],
                sort: Some("price".into()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn gateway_receives_routing_block() {
        let value = routing_params(ProviderKind::OpenRouter, Some(&extra_body()))
            .unwrap()
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"provider": {"only": ["DeepInfra"], "sort": "price"}})
        );
    }

    #[test]
    fn direct_backends_drop_routing_block() {
        for kind in [ProviderKind::OpenAI, ProviderKind::Anthropic, ProviderKind::DeepSeek] {
            assert_eq!(routing_params(kind, Some(&extra_body())).unwrap(), None);
        }
        assert_eq!(routing_params(ProviderKind::OpenRouter, None).unwrap(), None);
    }
}
