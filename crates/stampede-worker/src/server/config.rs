//! Startup options for the worker process.
//!
//! Options are read once at startup from CLI flags with environment
//! fallbacks (a `.env` file is honored before parsing), then frozen into a
//! [`WorkerConfig`]. Nothing is re-read while the server runs.

use clap::Parser;
use stampede_core::Result;

/// Listen port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;

/// Command-line and environment options for the worker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Port the HTTP server listens on. Defaults to 8080.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

/// Immutable worker configuration, built once from [`CliArgs`].
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// Port the HTTP server listens on.
    pub port: u16,
}

impl WorkerConfig {
    /// The address the server binds, on all interfaces.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl TryFrom<CliArgs> for WorkerConfig {
    type Error = stampede_core::Error;

    fn try_from(args: CliArgs) -> Result<Self> {
        let port = args.port.unwrap_or_else(|| {
            tracing::info!("defaulting to port {DEFAULT_PORT}");
            DEFAULT_PORT
        });
        Ok(Self { port })
    }
}
