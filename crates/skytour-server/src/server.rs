//! HTTP serving with the tick loop running alongside.

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{api, loops};

pub fn app(state: Arc<AppState>) -> axum::Router {
    api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve on a bound listener until `shutdown` resolves. The tick loop runs
/// for exactly as long as the server and has stopped when this returns.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let sim_handle = tokio::spawn(loops::sim_loop::run_sim_loop(
        state.clone(),
        shutdown_tx.subscribe(),
    ));

    let served = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await;

    let _ = shutdown_tx.send(());
    if let Err(e) = sim_handle.await {
        tracing::error!("Simulation loop task failed: {}", e);
    }

    served?;
    Ok(())
}
