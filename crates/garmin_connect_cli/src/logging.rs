//! Logging setup for the `connect` binary.

use tracing_subscriber::EnvFilter;

/// Targets kept at `warn` unless the filter names them explicitly.
const QUIET_TARGETS: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

/// Default level for a number of `-v` flags.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive: `CONNECT_LOG_LEVEL`, then `RUST_LOG`, then the `-v` level.
pub fn filter_directive(env_level: Option<String>, verbosity: u8) -> String {
    let level = env_level
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level_for_verbosity(verbosity).to_string());
    format!("{},{}", level, QUIET_TARGETS)
}

/// Install the global subscriber writing compact lines to stderr.
pub fn init(verbosity: u8) {
    let env_level = std::env::var("CONNECT_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let directive = filter_directive(env_level, verbosity);
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        EnvFilter::new(format!("{},{}", level_for_verbosity(verbosity), QUIET_TARGETS))
    });
    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .try_init();
    tracing::debug!("log filter: {}", directive);
}
