//! Diagnostic tracing, written to stderr.
//!
//! User-facing lines go through the `status!` and `warn!` macros instead.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "pluggo=warn";
const VERBOSE_FILTER: &str = "pluggo=debug";

/// Picks the filter directive: `RUST_LOG` wins, then `--verbose`.
pub fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => VERBOSE_FILTER.to_string(),
        None => DEFAULT_FILTER.to_string(),
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(filter_directive(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
