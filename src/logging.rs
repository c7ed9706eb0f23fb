//! Diagnostic logging setup.
//!
//! Report output goes to stdout; everything emitted through `tracing` goes to
//! stderr so it never mixes with validator output.

use tracing_subscriber::EnvFilter;

const VERBOSE_DIRECTIVE: &str = "spdx_verify=debug";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Pick the filter directive: `--verbose` wins, then `RUST_LOG`, then warnings only.
pub fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return VERBOSE_DIRECTIVE.to_string();
    }
    match rust_log.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
