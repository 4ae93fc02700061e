//! Tracing bootstrap for binaries and tests embedding the emitter.
//!
//! Captured listener failures are logged through [`tracing`]; nothing is
//! visible until a subscriber is installed. Applications with their own
//! subscriber setup should keep using it; this helper covers the common
//! case.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a formatted stderr subscriber honoring `RUST_LOG`.
///
/// Falls back to `error,tannoy=error` when `RUST_LOG` is unset. No-op if a
/// global subscriber is already installed, so tests can call it freely.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("error,tannoy=error"))
        .unwrap();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
