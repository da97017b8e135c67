//! Tracing setup.
//!
//! Events go to stderr so stdout carries only the generator output.

use tracing_subscriber::EnvFilter;

use crate::args::DEFAULT_LOG_FILTER;

/// Builds the filter for `directive`, falling back to the default filter
/// when the directive does not parse.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("stride: invalid log filter '{}': {}", directive, err);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
