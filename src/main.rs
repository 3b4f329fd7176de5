//! Timed Quiz - A state-managed HTTP server for timed multiple-choice quizzes
//!
//! This is the main entry point for the timed-quiz application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use timed_quiz::{
    catalog::Catalog,
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timed_quiz={},tower_http=info", config.log_level()))
        .init();

    info!("Starting timed-quiz server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, catalog={:?}",
          config.host, config.port, config.catalog);

    let catalog = Catalog::load(config.catalog.as_deref())?;
    for (difficulty, settings) in &catalog.difficulties {
        info!("  {:<7} {} minutes", difficulty.as_str(), settings.time_minutes);
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), catalog));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /quiz           - Current view");
    info!("  PUT  /quiz/name      - Update the entry name");
    info!("  POST /quiz/start     - Start at a difficulty");
    info!("  POST /quiz/next      - Next question (finishes on the last)");
    info!("  POST /quiz/previous  - Previous question");
    info!("  POST /quiz/jump/:i   - Jump to a question");
    info!("  POST /quiz/answer    - Answer the current question");
    info!("  POST /quiz/finish    - Submit the quiz");
    info!("  POST /quiz/reset     - Back to the entry view");
    info!("  GET  /quiz/timer     - Countdown events (SSE)");
    info!("  GET  /status         - Session and timer status");
    info!("  GET  /health         - Health check");

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

    info!("Server shutdown complete");
    Ok(())
}
