//! Hookrelay Server - Main Entry Point
//!
//! GitHub webhook gateway for Actions dispatch.

use anyhow::Result;
use tracing::info;

use hookrelay_server::webhook::dispatch::Dispatcher;
use hookrelay_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookrelay_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Hookrelay Server"
    );

    // Build the dispatch client
    let dispatcher = Dispatcher::new(&config)?;
    info!(
        owner = %config.repo_owner,
        repo = %config.repo_name,
        "Repository dispatch target configured"
    );

    // Build application state
    let state = api::AppState::new(config.clone(), dispatcher);

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
