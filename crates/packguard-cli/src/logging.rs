//! Tracing subscriber setup.
//!
//! Logs always go to stderr so stdout carries only results. `RUST_LOG`
//! overrides the level chosen from the flags.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,packguard_core=debug,packguard=debug";

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
