//! Countdown Keypad - a keypad-driven countdown engine
//! 
//! This is the main entry point for the countdown-keypad server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_keypad::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::state_logger_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_keypad={},tower_http=info", config.log_level()))
        .init();

    let settings = config.countdown_settings();
    info!("Starting countdown-keypad server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={:?}, start_delay={:?}, clock={:?}",
          config.host, config.port, settings.tick_interval, settings.start_delay, config.clock);

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        settings,
        config.build_clock(),
    ));

    tokio::spawn(state_logger_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /keypad/digit/:digit - Type a digit (0-9)");
    info!("  POST /keypad/delete       - Delete the last digit");
    info!("  POST /countdown/start     - Start the countdown");
    info!("  POST /countdown/stop      - Stop and reset");
    info!("  GET  /status              - Current keypad and countdown state");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
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

    if let Err(e) = state.stop_countdown() {
        tracing::error!("Failed to stop countdown on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
