//! Tracing bootstrap for processes embedding the engine.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// Reads `RUST_LOG` for the filter, defaulting to `info`. `json = true`
/// switches to structured output for log shippers. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        fmt().with_env_filter(filter).json().try_init().ok();
    } else {
        fmt().with_env_filter(filter).try_init().ok();
    }
}
