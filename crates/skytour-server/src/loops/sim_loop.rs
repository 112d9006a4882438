//! Simulation tick loop.
//!
//! Advances the fleet once per configured interval and publishes a snapshot
//! after each tick. The first tick fires one full interval after start.

use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::state::AppState;

pub async fn run_sim_loop(state: Arc<AppState>, mut shutdown: broadcast::Receiver<()>) {
    let period = state.config().tick_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!("Simulation loop started (tick every {:?})", period);

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Simulation loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let report = state.tick();

                for alert in &report.alerts {
                    tracing::warn!(
                        drone_id = %alert.drone_id,
                        geofence_id = %alert.geofence_id,
                        "{}",
                        alert.message
                    );
                }
                for drone_id in &report.completed {
                    tracing::info!("{} finished its route, offloading footage", drone_id);
                }
                tracing::debug!(
                    "Tick {}: {} drone(s) advanced",
                    report.tick,
                    report.advanced.len()
                );
            }
        }
    }
}
