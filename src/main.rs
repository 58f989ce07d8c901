//! Digital Timer - A state-managed HTTP server exposing a countdown timer
//!
//! This is the main entry point for the digital-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use digital_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("digital_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting digital-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let state = Arc::new(AppState::new(config.port, config.host.clone()));
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer                - Render the timer");
    info!("  POST /timer/start-pause    - Start or pause the timer");
    info!("  POST /timer/reset          - Reset the timer");
    info!("  POST /timer/limit/increase - Add one minute to the limit");
    info!("  POST /timer/limit/decrease - Remove one minute from the limit");
    info!("  GET  /status               - Timer and server status");
    info!("  GET  /health               - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to shut down timer: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
