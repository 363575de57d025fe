//! Tracing subscriber setup for host binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a formatted tracing subscriber filtered by `RUST_LOG`
/// (default level: info).
///
/// Call once from the host binary's entry point. Panics if a global
/// subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).init();
}
