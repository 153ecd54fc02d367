// src/logging.rs
// =============================================================================
// Log setup. Everything goes to stderr so stdout stays clean for --json.
//
// The filter defaults to "info" and can be changed with RUST_LOG, e.g.
//   RUST_LOG=page_tally=debug page-tally http://localhost:8000/
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
