//! Shared simulation state.
//!
//! The tick loop is the only writer during normal operation; operator
//! `resume` requests take the same lock. Snapshots are published while the
//! lock is held, so subscribers see changes in order. Readers get owned
//! snapshots and never hold the lock across an await.

use skytour_core::{
    Alert, DroneState, FleetSnapshot, NoFlyZone, RouteCatalog, ServiceCatalog, SimError,
    Simulator, TickReport, World,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::config::Config;

/// Snapshot published to stream subscribers after every state change.
#[derive(Debug, Clone)]
pub struct FleetEvent {
    pub tick: u64,
    pub snapshot: Arc<FleetSnapshot>,
    /// Pre-serialized snapshot JSON shared by every subscriber
    pub payload: Arc<str>,
}

/// Application state - owns the simulator and the snapshot broadcast.
pub struct AppState {
    world: Arc<World>,
    services: ServiceCatalog,
    sim: Mutex<Simulator>,
    pub tx: broadcast::Sender<FleetEvent>,
    config: Config,
}

impl AppState {
    /// Built-in routes and fleet, no-fly radius from config.
    pub fn new(config: Config) -> Self {
        let zone = NoFlyZone {
            radius_m: config.no_fly_radius_m,
            ..NoFlyZone::default()
        };
        let world = Arc::new(World::new(RouteCatalog::builtin(), zone));
        Self::with_simulator(Simulator::with_default_fleet(world), config)
    }

    pub fn with_simulator(sim: Simulator, config: Config) -> Self {
        let (tx, _) = broadcast::channel(config.stream_capacity.max(1));
        Self {
            world: sim.world().clone(),
            services: ServiceCatalog::builtin(),
            sim: Mutex::new(sim),
            tx,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    fn sim(&self) -> MutexGuard<'_, Simulator> {
        // A panic mid-tick leaves at worst a half-advanced fleet; keep serving it.
        self.sim.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance the simulation one tick and publish the new snapshot.
    pub fn tick(&self) -> TickReport {
        let mut sim = self.sim();
        let report = sim.tick();
        self.publish(sim.snapshot(self.config.recent_alerts));
        report
    }

    /// Operator intervention: send a grounded drone back out.
    pub fn resume(&self, drone_id: &str) -> Result<DroneState, SimError> {
        let mut sim = self.sim();
        let drone = sim.resume(drone_id)?.clone();
        self.publish(sim.snapshot(self.config.recent_alerts));
        Ok(drone)
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.sim().snapshot(self.config.recent_alerts)
    }

    pub fn get_all_drones(&self) -> Vec<DroneState> {
        self.sim().state().drones.clone()
    }

    pub fn get_drone(&self, drone_id: &str) -> Option<DroneState> {
        self.sim().drone(drone_id).cloned()
    }

    /// Most recent `limit` alerts, oldest first.
    pub fn recent_alerts(&self, limit: usize) -> Vec<Alert> {
        self.sim().state().alerts.recent(limit).to_vec()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FleetEvent> {
        self.tx.subscribe()
    }

    /// Current fleet plus a receiver for every change made after it.
    pub fn subscribe_with_snapshot(&self) -> (broadcast::Receiver<FleetEvent>, FleetSnapshot) {
        let sim = self.sim();
        (self.tx.subscribe(), sim.snapshot(self.config.recent_alerts))
    }

    fn publish(&self, snapshot: FleetSnapshot) {
        if self.tx.receiver_count() == 0 {
            return;
        }
        let payload = match serde_json::to_string(&snapshot) {
            Ok(json) => Arc::<str>::from(json),
            Err(e) => {
                tracing::error!("Failed to serialize fleet snapshot: {}", e);
                return;
            }
        };
        // Send only fails when every receiver dropped in the meantime.
        let _ = self.tx.send(FleetEvent {
            tick: snapshot.tick,
            snapshot: Arc::new(snapshot),
            payload,
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_publishes_snapshot_to_subscribers() {
        let state = AppState::default();
        let mut rx = state.subscribe();

        let report = state.tick();
        let event = rx.try_recv().expect("snapshot published");
        assert_eq!(report.tick, 1);
        assert_eq!(event.tick, 1);
        assert_eq!(event.snapshot.drones.len(), 3);

        let parsed: serde_json::Value = serde_json::from_str(&event.payload).unwrap();
        assert_eq!(parsed["tick"], 1);
    }

    #[test]
    fn subscriber_sees_only_changes_after_its_snapshot() {
        let state = AppState::default();
        state.tick();
        state.tick();

        let (mut rx, initial) = state.subscribe_with_snapshot();
        assert_eq!(initial.tick, 2);
        assert!(rx.try_recv().is_err());

        // Resume changes the fleet without advancing the tick counter.
        state.resume("drone3").unwrap();
        let event = rx.try_recv().expect("resume published");
        assert_eq!(event.tick, initial.tick);
        assert!(event.snapshot.drone("drone3").unwrap().is_flying);

        state.tick();
        assert_eq!(rx.try_recv().unwrap().tick, 3);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn resume_reports_unknown_drone() {
        let state = AppState::default();
        assert_eq!(
            state.resume("nope").unwrap_err(),
            SimError::UnknownDrone("nope".to_string())
        );
    }

    #[test]
    fn configured_radius_reaches_the_world() {
        let config = Config {
            no_fly_radius_m: 50.0,
            ..Config::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.world().no_fly_zone.radius_m, 50.0);

        // With a 50 m fence the valley route no longer violates.
        for _ in 0..3 {
            state.tick();
        }
        assert!(state.recent_alerts(5).is_empty());
    }
}
