//! Output rendering for orcx.
//!
//! Defines the [`Renderer`] trait that decouples streamed LLM output from the
//! display layer, plus the printers for whole responses.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::request::Response;

/// Trait for rendering streamed LLM output.
pub trait Renderer {
    /// Render a single text fragment as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when the full response is complete.
    fn render_done(&mut self);

    /// Called when an error occurs during streaming.
    fn render_error(&mut self, err: &str);
}

/// Renders streaming LLM output directly to stdout.
///
/// Each fragment is printed immediately with an explicit flush; nothing is
/// buffered for display.
pub struct StdoutRenderer {
    fragments: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self { fragments: 0 }
    }

    /// Returns the number of fragments rendered so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }
}

impl Renderer for StdoutRenderer {
    fn render_token(&mut self, token: &str) {
        print!("{}", token);
        // Flush immediately so each fragment appears as it arrives
        io::stdout().flush().ok();
        self.fragments += 1;
    }

    fn render_done(&mut self) {
        println!(); // Final newline after stream ends
    }

    fn render_error(&mut self, err: &str) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

/// Prints a complete response, as pretty JSON or as plain text.
pub fn print_response(response: &Response, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", response.content);
    }
    Ok(())
}
