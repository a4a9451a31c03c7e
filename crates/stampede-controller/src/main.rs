use clap::Parser;
use stampede_controller::server::config::{CliArgs, ControllerConfig};
use stampede_controller::server::service::handler::{self, AppState};
use stampede_controller::server::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    init_telemetry()?;

    let args = CliArgs::parse();
    let config = ControllerConfig::try_from(args)?;

    // Bind failure is fatal; everything after this point is best-effort.
    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    log_startup_info(&addr, &config);

    axum::serve(listener, handler::app(AppState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Controller shut down successfully");
    Ok(())
}

fn log_startup_info(addr: &str, config: &ControllerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting controller on {addr} with full config: {config:#?}");
    } else {
        tracing::info!(
            "Starting controller on {addr}: bursts of {} senders for {:?} against {}",
            config.burst_concurrency,
            config.burst_duration,
            config.worker_url
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");
}
