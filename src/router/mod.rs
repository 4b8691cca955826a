//! Request routing: from a [`Request`](crate::request::Request) to fully
//! resolved [`CompletionParams`].
//!
//! Everything here is synchronous and pure over its inputs (request, agent
//! registry snapshot, config snapshot); no I/O happens in this module.

mod messages;
mod model_id;
mod params;
mod prefs;
mod quant;
mod resolve;

pub use messages::build_messages;
pub use model_id::{extract_provider, SEPARATOR};
pub use params::{build_params, CompletionParams, ExtraBody};
#[cfg(test)]
pub use params::ProviderRouting;
pub use prefs::ProviderPrefs;
pub use quant::QUANT_BY_BITS;
pub use resolve::resolve_model;

use crate::config::Config;
use crate::error::RouteError;
use crate::registry::AgentRegistry;
use crate::request::Request;

/// Runs the whole routing pipeline for one request.
///
/// Resolves the model, builds messages and assembles parameters with the
/// config's global provider preferences merged under the agent's.
pub fn prepare(
    request: &Request,
    registry: &AgentRegistry,
    config: &Config,
) -> Result<CompletionParams, RouteError> {
    let selection = resolve_model(request, registry, config)?;
    let messages = build_messages(request, selection.agent);
    Ok(build_params(
        request,
        selection.agent,
        &selection.model,
        messages,
        request.stream,
        config.provider_prefs.as_ref(),
    ))
}
