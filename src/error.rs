//! Error types raised by model routing, and their presentation.
//!
//! [`RouteError`] is the closed set of failures the routing core can produce.
//! Everything else (config I/O, network calls) travels as [`anyhow::Error`].
//! [`report`] is the single place where an error becomes user-facing text and
//! a process exit code.

use std::process::ExitCode;

use colored::Colorize;
use thiserror::Error;

/// Failures raised while resolving a request into a model call.
///
/// None of these are retried; the caller presents them and exits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Model id lacks a `/` separator or has an empty provider/model segment.
    #[error("invalid model format: \"{0}\" (expected provider/model, e.g. openai/gpt-4o)")]
    InvalidModelFormat(String),
    /// The requested agent is not in the registry.
    #[error("agent not found: {0}")]
    AgentNotFound(String),
    /// No explicit model, no agent and no usable default in config.
    #[error("no model specified and no default configured (use --model, --agent, or set default_model)")]
    NoModelSpecified,
}

/// Fieldless tag for each [`RouteError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidModelFormat,
    AgentNotFound,
    NoModelSpecified,
}

impl RouteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::InvalidModelFormat(_) => ErrorKind::InvalidModelFormat,
            RouteError::AgentNotFound(_) => ErrorKind::AgentNotFound,
            RouteError::NoModelSpecified => ErrorKind::NoModelSpecified,
        }
    }
}

impl ErrorKind {
    /// Process exit code for this kind. `1` is reserved for untyped failures.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidModelFormat => 2,
            ErrorKind::AgentNotFound => 3,
            ErrorKind::NoModelSpecified => 4,
        }
    }
}

/// Exit code used for any failure that is not a [`RouteError`].
pub const GENERIC_EXIT_CODE: u8 = 1;

/// Maps an error to its exit code without printing anything.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<RouteError>() {
        Some(route) => route.kind().exit_code(),
        None => GENERIC_EXIT_CODE,
    }
}

/// Prints `err` to stderr and returns the matching exit code.
///
/// With `debug` set the whole context chain is printed, one cause per line.
pub fn report(err: &anyhow::Error, debug: bool) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), err);
    if debug {
        for cause in err.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
    }
    ExitCode::from(exit_code_for(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn each_kind_has_a_distinct_exit_code() {
        let codes = [
            ErrorKind::InvalidModelFormat.exit_code(),
            ErrorKind::AgentNotFound.exit_code(),
            ErrorKind::NoModelSpecified.exit_code(),
        ];
        assert!(!codes.contains(&GENERIC_EXIT_CODE));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn route_errors_survive_added_context() {
        let err: anyhow::Result<()> =
            Err(RouteError::AgentNotFound("coder".into())).context("while resolving model");
        let err = err.unwrap_err();
        assert_eq!(exit_code_for(&err), ErrorKind::AgentNotFound.exit_code());
    }

    #[test]
    fn untyped_errors_use_generic_code() {
        let err = anyhow::anyhow!("connection refused");
        assert_eq!(exit_code_for(&err), GENERIC_EXIT_CODE);
    }

    #[test]
    fn invalid_format_message_names_the_id() {
        let err = RouteError::InvalidModelFormat("gpt-4o".into());
        assert!(err.to_string().contains("gpt-4o"));
        assert_eq!(err.kind(), ErrorKind::InvalidModelFormat);
    }
}
