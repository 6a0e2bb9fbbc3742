//! Tracing setup for hosts embedding the task board.

use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Install a compact fmt subscriber honouring `RUST_LOG` (default INFO).
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
