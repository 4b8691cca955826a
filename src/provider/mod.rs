//! LLM provider execution for orcx.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch, keeping provider-specific details out of the routing core.
//! Supports Anthropic, OpenAI, OpenRouter, and Ollama (local) via [`ProviderKind`].

mod client;
mod kind;
mod listing;

pub use client::Provider;
#[allow(unused_imports)]
pub use kind::{split_model_id, ProviderKind};
pub use listing::list_models;
