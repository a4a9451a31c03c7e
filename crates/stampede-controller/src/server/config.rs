//! Startup options for the controller process.
//!
//! Options are read once at startup from CLI flags with environment
//! fallbacks (a `.env` file is honored before parsing), validated, and
//! frozen into a [`ControllerConfig`]. Bursts snapshot from the frozen
//! config at trigger time; nothing is re-read while a burst runs.
//!
//! The worker address is the only validated option: it must parse as an
//! `http` or `https` URL. Reachability is deliberately not probed. An
//! unreachable worker produces a burst of logged transport failures, not a
//! startup error.

use clap::Parser;
use core::time::Duration;
use stampede_core::{DEFAULT_SLEEP_MS, Error, Result};

/// Listen port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;
/// Senders spawned per burst unless overridden.
pub const DEFAULT_BURST_CONCURRENCY: usize = 20;
/// Burst window length in milliseconds unless overridden.
pub const DEFAULT_BURST_DURATION_MS: u64 = 60_000;

/// Command-line and environment options for the controller.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// URL the senders POST work to (http or https).
    #[arg(long, env = "WORKER_ADDRESS")]
    pub worker_address: String,

    /// How long the worker should sleep for each request, in milliseconds.
    #[arg(long, env = "WORKER_SLEEP_MS", default_value_t = DEFAULT_SLEEP_MS)]
    pub worker_sleep_ms: u64,

    /// Number of concurrent senders per burst. Zero is allowed and makes a
    /// trigger complete immediately.
    #[arg(long, env = "BURST_CONCURRENCY", default_value_t = DEFAULT_BURST_CONCURRENCY)]
    pub burst_concurrency: usize,

    /// Length of the burst window, in milliseconds.
    #[arg(long, env = "BURST_DURATION_MS", default_value_t = DEFAULT_BURST_DURATION_MS)]
    pub burst_duration_ms: u64,

    /// Port the trigger endpoint listens on. Defaults to 8080.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

/// Immutable controller configuration, validated once from [`CliArgs`].
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Validated target for every sender request.
    pub worker_url: reqwest::Url,
    /// `sleep_ms` value carried in every payload.
    pub worker_sleep_ms: u64,
    /// Senders spawned per burst.
    pub burst_concurrency: usize,
    /// Length of the burst window.
    pub burst_duration: Duration,
    /// Port the trigger endpoint listens on.
    pub port: u16,
}

impl ControllerConfig {
    /// The address the trigger endpoint binds, on all interfaces.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl TryFrom<CliArgs> for ControllerConfig {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self> {
        let worker_url =
            reqwest::Url::parse(&args.worker_address).map_err(|e| Error::InvalidConfig {
                reason: format!("worker address {:?}: {e}", args.worker_address),
            })?;
        if !matches!(worker_url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "worker address {:?}: scheme must be http or https",
                    args.worker_address
                ),
            });
        }

        let port = args.port.unwrap_or_else(|| {
            tracing::info!("defaulting to port {DEFAULT_PORT}");
            DEFAULT_PORT
        });

        Ok(Self {
            worker_url,
            worker_sleep_ms: args.worker_sleep_ms,
            burst_concurrency: args.burst_concurrency,
            burst_duration: Duration::from_millis(args.burst_duration_ms),
            port,
        })
    }
}
