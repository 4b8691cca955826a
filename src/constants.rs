//! Centralized constants for orcx.
//!
//! Default strings, file names and environment variable names live here so
//! they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "orcx";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Agent registry filename, next to the config file.
pub const AGENTS_FILENAME: &str = "agents.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "orcx.toml";

/// Overrides the configuration directory when set.
pub const CONFIG_DIR_ENV: &str = "ORCX_CONFIG_DIR";

/// Log filter directive, in `tracing_subscriber::EnvFilter` syntax.
pub const LOG_ENV: &str = "ORCX_LOG";

/// Fixed assistant reply inserted after a context message.
pub const CONTEXT_ACKNOWLEDGEMENT: &str = "Understood.";

// --- Provider defaults ---

/// Max tokens sent to backends that refuse requests without one (Anthropic).
pub const REQUIRED_MAX_TOKENS_DEFAULT: u64 = 4096;

/// Default base URL for local Ollama server.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Timeout for the Ollama model listing request, in seconds.
pub const OLLAMA_LIST_TIMEOUT_SECS: u64 = 2;
