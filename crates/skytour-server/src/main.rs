//! SkyTour Server - Always-on drone tour simulation backend

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use skytour_server::config::Config;
use skytour_server::state::AppState;
use skytour_server::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logging(config.log_json)?;

    tracing::info!("Starting SkyTour Server...");

    let port = config.server_port;
    let state = Arc::new(AppState::new(config));
    {
        let world = state.world();
        tracing::info!(
            "Loaded {} route(s); no-fly zone '{}' r={}m",
            world.catalog.len(),
            world.no_fly_zone.name,
            world.no_fly_zone.radius_m
        );
    }

    // Nothing runs in the background until the port is bound.
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    server::serve(listener, state, shutdown_signal()).await?;
    tracing::info!("SkyTour Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
