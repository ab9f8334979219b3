//! Call QC Server Entry Point

use std::net::SocketAddr;

use clap::Parser;

use call_qc_config::load_settings;
use call_qc_server::{create_router, init_tracing, AppState};

/// HTTP service for call quality scoring
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Extra TOML settings file layered over config/default.toml
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration first (need observability settings for tracing init)
    let config = load_settings(args.config.as_deref())?;

    init_tracing(&config.observability, None);

    tracing::info!("Starting Call QC Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        mode = %config.scoring.mode,
        policy = %config.scoring.derived_policy,
        "Loaded configuration"
    );

    let addr: SocketAddr = config.server.bind_address().parse()?;
    let state = AppState::new(config);
    let app = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
