//! Request and response types exchanged with the router.

use serde::{Deserialize, Serialize};

/// One prompt to route, built once per invocation and never mutated.
///
/// Every field but `prompt` is optional; unset fields fall back to the
/// resolved agent and then to config defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub prompt: String,
    pub agent: Option<String>,
    pub model: Option<String>,
    pub context: Option<String>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u64>,
    pub temperature: Option<f64>,
    #[serde(default)]
    pub stream: bool,
}

impl Request {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Result of a non-streaming call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub content: String,
    pub model: String,
    pub provider: String,
}
