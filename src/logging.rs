//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "ARMORY_LOG";

/// Filter used when `ARMORY_LOG` is unset or invalid
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "armory=debug" } else { "armory=warn" }
}

fn filter(env_value: Option<&str>, verbose: bool) -> EnvFilter {
    env_value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber, writing to stderr without timestamps
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let env_value = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(env_value.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
