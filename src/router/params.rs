//! Builds the final completion parameters handed to the provider layer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prefs::{self, ProviderPrefs};
use crate::message::Message;
use crate::registry::AgentConfig;
use crate::request::Request;

/// Everything the execution layer needs for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Extra request-body fields for preference-aware gateways.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_body: Option<ExtraBody>,
}

/// Extra request-body fields; serialized under the request's top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraBody {
    pub provider: ProviderRouting,
}

/// The `provider` block of a gateway request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRouting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantizations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_fallbacks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl ProviderRouting {
    /// Translates effective preferences into the gateway's routing block.
    ///
    /// An explicit `order` wins over `prefer`; `prefer` becomes the order with
    /// fallbacks forced on.
    pub fn from_prefs(prefs: &ProviderPrefs) -> Self {
        let (order, allow_fallbacks) = if !prefs.order.is_empty() {
            (Some(prefs.order.clone()), prefs.allow_fallbacks)
        } else if !prefs.prefer.is_empty() {
            (Some(prefs.prefer.clone()), Some(true))
        } else {
            (None, None)
        };

        Self {
            quantizations: prefs.resolve_quantizations(),
            ignore: prefs.ignore.clone(),
            only: prefs.only.clone(),
            order,
            allow_fallbacks,
            sort: prefs.sort.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Combines the resolved model, messages and preferences into call parameters.
///
/// `max_tokens` and `temperature` come from the request, else the agent, else
/// are omitted. A zero `max_tokens` counts as unset; an explicit zero
/// temperature is kept. The routing block is
/// built from the agent's preferences merged over `global_prefs` and omitted
/// entirely when it would be empty.
pub fn build_params(
    request: &Request,
    agent: Option<&AgentConfig>,
    model: &str,
    messages: Vec<Message>,
    stream: bool,
    global_prefs: Option<&ProviderPrefs>,
) -> CompletionParams {
    let max_tokens = request
        .max_tokens
        .filter(|&n| n > 0)
        .or_else(|| agent.and_then(|a| a.max_tokens).filter(|&n| n > 0));
    let temperature = request
        .temperature
        .or_else(|| agent.and_then(|a| a.temperature));

    let effective = prefs::merge(agent.and_then(|a| a.provider_prefs.as_ref()), global_prefs);
    let routing = ProviderRouting::from_prefs(&effective);
    let extra_body = (!routing.is_empty()).then_some(ExtraBody { provider: routing });

    debug!(
        model,
        stream,
        max_tokens,
        temperature,
        routing = extra_body.is_some(),
        "built completion params"
    );

    CompletionParams {
        model: model.to_string(),
        messages,
        stream,
        max_tokens,
        temperature,
        extra_body,
    }
}
