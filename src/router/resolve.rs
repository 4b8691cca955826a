//! Model resolution: decides which model answers a request.
//!
//! Precedence, first match wins:
//!   1. explicit `--model`
//!   2. explicit `--agent` (must exist)
//!   3. `default_model` from config
//!   4. `default_agent` from config (skipped when not in the registry)
//!
//! The chosen id is then alias-expanded and validated.

use tracing::debug;

use super::model_id::{expand_alias, validate};
use crate::config::Config;
use crate::error::RouteError;
use crate::registry::{AgentConfig, AgentRegistry};
use crate::request::Request;

/// Resolved model id plus the agent backing it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSelection<'a> {
    pub model: String,
    pub agent: Option<&'a AgentConfig>,
}

/// Resolve which model (and agent) serves `request`.
///
/// # Errors
///
/// [`RouteError::AgentNotFound`] for an unknown `request.agent`,
/// [`RouteError::NoModelSpecified`] when nothing applies, and
/// [`RouteError::InvalidModelFormat`] when the chosen id is malformed.
pub fn resolve_model<'a>(
    request: &Request,
    registry: &'a AgentRegistry,
    config: &Config,
) -> Result<ModelSelection<'a>, RouteError> {
    let (raw, agent) = select(request, registry, config)?;
    let model = expand_alias(&raw, &config.aliases);
    validate(&model)?;
    debug!(
        model = %model,
        agent = agent.map(|a| a.name.as_str()),
        "resolved model"
    );
    Ok(ModelSelection { model, agent })
}

fn select<'a>(
    request: &Request,
    registry: &'a AgentRegistry,
    config: &Config,
) -> Result<(String, Option<&'a AgentConfig>), RouteError> {
    if let Some(model) = &request.model {
        debug!("using explicit model from request");
        return Ok((model.clone(), None));
    }

    if let Some(name) = &request.agent {
        let agent = registry
            .get(name)
            .ok_or_else(|| RouteError::AgentNotFound(name.clone()))?;
        debug!(agent = %name, "using requested agent");
        return Ok((agent.model.clone(), Some(agent)));
    }

    if let Some(model) = &config.default_model {
        debug!("using default_model from config");
        return Ok((model.clone(), None));
    }

    if let Some(name) = &config.default_agent {
        if let Some(agent) = registry.get(name) {
            debug!(agent = %name, "using default_agent from config");
            return Ok((agent.model.clone(), Some(agent)));
        }
        debug!(agent = %name, "default_agent not in registry, ignoring");
    }

    Err(RouteError::NoModelSpecified)
}
