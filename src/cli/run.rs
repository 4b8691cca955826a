//! The `orcx run` command: resolve, build and execute one prompt.

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::RunArgs;
use crate::config::Config;
use crate::output::{self, StdoutRenderer};
use crate::provider::Provider;
use crate::registry::AgentRegistry;
use crate::request::{Request, Response};
use crate::router;

/// Handles `orcx run`.
pub(super) async fn handle_run(args: RunArgs) -> Result<()> {
    let prompt = match args.prompt.is_empty() {
        false => args.prompt.join(" "),
        true => read_stdin_prompt()?,
    };
    if prompt.trim().is_empty() {
        bail!("Empty prompt");
    }

    let request = Request {
        prompt,
        agent: args.agent,
        model: args.model,
        context: assemble_context(args.context, &args.files)?,
        system_prompt: args.system,
        max_tokens: args.max_tokens,
        temperature: args.temperature,
        stream: !args.no_stream && !args.json,
    };

    let config = Config::load()?;
    let registry = AgentRegistry::load()?;
    let params = router::prepare(&request, &registry, &config)?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    let provider = Provider::from_config(&config, &params.model)?;
    if params.stream {
        let mut renderer = StdoutRenderer::new();
        provider.stream(&params, &mut renderer).await?;
        debug!(fragments = renderer.fragment_count(), "stream finished");
    } else {
        let content = provider.complete(&params).await?;
        let response = Response {
            content,
            provider: router::extract_provider(&params.model).to_string(),
            model: params.model,
        };
        output::print_response(&response, args.json)?;
    }
    Ok(())
}

/// Reads the prompt from stdin when it is piped; errors on an interactive terminal.
fn read_stdin_prompt() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No prompt provided. Usage: orcx run \"your prompt\" (or pipe it via stdin)");
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read prompt from stdin")?;
    Ok(buf.trim().to_string())
}

/// Joins `--context` text and `--file` contents into one context block.
///
/// Each file is introduced by a `--- path ---` header. Returns `None` when
/// there is nothing to add.
fn assemble_context(context: Option<String>, files: &[PathBuf]) -> Result<Option<String>> {
    let mut parts: Vec<String> = context.into_iter().filter(|c| !c.is_empty()).collect();
    for path in files {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file {:?}", path))?;
        parts.push(format!("--- {} ---\n{}", path.display(), contents));
    }
    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(parts.join("\n\n")))
}
