//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with model output on stdout.
//! Filter precedence: `ORCX_LOG`, then `orcx=debug` under `--debug`, then `warn`.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Filter directive used when `ORCX_LOG` is unset.
fn default_directive(debug: bool) -> &'static str {
    if debug {
        "orcx=debug,warn"
    } else {
        "warn"
    }
}

/// Installs the global tracing subscriber. Safe to call once per process.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_crate_level() {
        assert_eq!(default_directive(false), "warn");
        assert!(default_directive(true).starts_with("orcx=debug"));
    }
}
