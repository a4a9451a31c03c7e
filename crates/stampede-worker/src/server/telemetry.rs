//! Log subscriber installation.
//!
//! Console logging only: a `tracing_subscriber` registry with an
//! [`EnvFilter`] (from `RUST_LOG`, defaulting to `info`) and a
//! human-readable `fmt` layer. The harness has no metrics or export
//! pipeline; the log stream is its observability surface.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global log subscriber. Call once, before serving.
pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        )
        .try_init()?;
    Ok(())
}
