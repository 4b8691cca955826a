//! Builds the ordered message list for a request.

use crate::constants::CONTEXT_ACKNOWLEDGEMENT;
use crate::message::Message;
use crate::registry::AgentConfig;
use crate::request::Request;

/// Assembles `[system?, context?, ack?, prompt]`.
///
/// The request's system prompt beats the agent's. Context goes in as a user
/// turn followed by a fixed assistant acknowledgement, so the model treats it
/// as background rather than the question. The prompt is always last. Empty
/// system prompts and context count as unset.
pub fn build_messages(request: &Request, agent: Option<&AgentConfig>) -> Vec<Message> {
    let mut messages = Vec::with_capacity(4);

    let system = non_empty(request.system_prompt.as_deref())
        .or_else(|| non_empty(agent.and_then(|a| a.system_prompt.as_deref())));
    if let Some(system) = system {
        messages.push(Message::system(system));
    }

    if let Some(context) = non_empty(request.context.as_deref()) {
        messages.push(Message::user(context));
        messages.push(Message::assistant(CONTEXT_ACKNOWLEDGEMENT));
    }

    messages.push(Message::user(request.prompt.as_str()));
    messages
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
