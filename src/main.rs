use std::net::SocketAddr;
use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use users_api::config::LogFormat;
use users_api::{AppState, Config, build_router, metrics, utils};

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration is needed before logging to pick the format, so load
    // errors are reported on stderr directly.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(exitcode::CONFIG as u8);
        }
    };

    init_tracing(&config);

    info!("Starting Users API v{}", env!("CARGO_PKG_VERSION"));

    match run(config).await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Install the global tracing subscriber.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Run the application, returning an exit code on error.
async fn run(config: Config) -> Result<(), exitcode::ExitCode> {
    info!(
        host = %config.host,
        port = %config.port,
        max_body_bytes = config.max_request_body_size,
        metrics_port = config.metrics_port,
        "Configuration loaded"
    );

    if let Some(metrics_addr) = config.metrics_addr() {
        if let Err(e) = metrics::init_metrics(metrics_addr) {
            warn!("Metrics disabled: {e}");
        }
    } else {
        info!("Prometheus metrics disabled (METRICS_PORT=0)");
    }

    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        error!("Invalid server address: {e}");
        exitcode::CONFIG
    })?;

    let app = build_router(AppState::new(config));

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints (all require Authorization: Bearer <token>):");
    info!("  POST   /users                 - Create user");
    info!("  GET    /users                 - List users");
    info!("  GET    /users/{{id}}            - Get user");
    info!("  PUT    /users/{{id}}            - Update user");
    info!("  DELETE /users/{{id}}            - Delete user");
    info!("  GET    /exception-test/{{num}}  - Diagnostic 1/num");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            exitcode::SOFTWARE
        })?;

    info!("Server shutdown complete");
    Ok(())
}
