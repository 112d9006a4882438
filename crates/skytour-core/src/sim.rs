//! Geofence-aware drone motion simulation.
//!
//! Each tick moves every flying drone one waypoint along its own route.
//! A drone whose next waypoint lies inside the no-fly zone is held in place
//! and grounded with an alert; a drone reaching the end of a glacier route is
//! grounded to offload footage. Ticks never bring a drone back into the air;
//! only [`Simulator::resume`] does.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::alerts::AlertLog;
use crate::catalog::{default_fleet, RouteCatalog};
use crate::error::SimError;
use crate::models::{flying_status, Alert, Coordinate, DroneState, GroundedReason, NoFlyZone};
use crate::snapshot::FleetSnapshot;
use crate::spatial;

/// Static configuration the simulation runs against.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub catalog: RouteCatalog,
    pub no_fly_zone: NoFlyZone,
}

impl World {
    pub fn new(catalog: RouteCatalog, no_fly_zone: NoFlyZone) -> Self {
        Self {
            catalog,
            no_fly_zone,
        }
    }

    pub fn inside_no_fly_zone(&self, position: Coordinate) -> bool {
        self.no_fly_zone.contains(position)
    }
}

/// Everything a tick mutates.
#[derive(Debug, Clone, Default)]
pub struct FleetState {
    /// Number of ticks applied so far
    pub tick: u64,
    pub drones: Vec<DroneState>,
    pub alerts: AlertLog,
}

impl FleetState {
    pub fn new(drones: Vec<DroneState>) -> Self {
        Self {
            tick: 0,
            drones,
            alerts: AlertLog::new(),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct TickReport {
    pub tick: u64,
    /// Drones that moved to their next waypoint
    pub advanced: Vec<String>,
    /// Alerts raised by this tick
    pub alerts: Vec<Alert>,
    /// Drones that finished a route and landed to offload
    pub completed: Vec<String>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.advanced.is_empty() && self.alerts.is_empty() && self.completed.is_empty()
    }
}

/// Pure transition: returns the next fleet state without touching `state`.
pub fn step(world: &World, state: &FleetState, now: DateTime<Utc>) -> (FleetState, TickReport) {
    let mut next = state.clone();
    let report = advance(world, &mut next, now);
    (next, report)
}

fn advance(world: &World, state: &mut FleetState, now: DateTime<Utc>) -> TickReport {
    state.tick += 1;
    let mut report = TickReport {
        tick: state.tick,
        ..TickReport::default()
    };

    for drone in state.drones.iter_mut().filter(|d| d.is_flying) {
        let route = world.catalog.resolve(&drone.assignment);
        let next_index = route.next_index(drone.route_index);
        let Some(candidate) = route.waypoint(next_index) else {
            continue;
        };

        if world.inside_no_fly_zone(candidate) {
            drone.ground(GroundedReason::GeofenceViolation);
            let alert = state
                .alerts
                .push(&drone.drone_id, &world.no_fly_zone, state.tick, now);
            report.alerts.push(alert.clone());
            continue;
        }

        drone.heading_deg = spatial::bearing_deg(drone.position, candidate);
        drone.position = candidate;
        drone.route_index = next_index;
        report.advanced.push(drone.drone_id.clone());

        if next_index == route.last_index() && route.site.offloads_at_route_end() {
            drone.ground(GroundedReason::DataOffload);
            report.completed.push(drone.drone_id.clone());
        }
    }

    report
}

/// Single owner of the simulation state.
#[derive(Debug, Clone)]
pub struct Simulator {
    world: Arc<World>,
    state: FleetState,
}

impl Simulator {
    pub fn new(world: Arc<World>, drones: Vec<DroneState>) -> Self {
        Self {
            world,
            state: FleetState::new(drones),
        }
    }

    /// Simulator seeded with the startup fleet for `world`'s catalog.
    pub fn with_default_fleet(world: Arc<World>) -> Self {
        let drones = default_fleet(&world.catalog);
        Self::new(world, drones)
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn state(&self) -> &FleetState {
        &self.state
    }

    pub fn drone(&self, drone_id: &str) -> Option<&DroneState> {
        self.state.drones.iter().find(|d| d.drone_id == drone_id)
    }

    pub fn tick(&mut self) -> TickReport {
        self.tick_at(Utc::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> TickReport {
        advance(&self.world, &mut self.state, now)
    }

    /// Apply `ticks` ticks back to back.
    pub fn run(&mut self, ticks: u64) -> Vec<TickReport> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Put a grounded drone back on its route from where it stopped.
    pub fn resume(&mut self, drone_id: &str) -> Result<&DroneState, SimError> {
        let drone = self
            .state
            .drones
            .iter_mut()
            .find(|d| d.drone_id == drone_id)
            .ok_or_else(|| SimError::UnknownDrone(drone_id.to_string()))?;

        if drone.is_flying {
            return Err(SimError::AlreadyFlying(drone_id.to_string()));
        }

        let route = self.world.catalog.resolve(&drone.assignment);
        drone.is_flying = true;
        drone.grounded_reason = None;
        drone.status = flying_status(&route.name);
        Ok(drone)
    }

    pub fn snapshot(&self, recent_alerts: usize) -> FleetSnapshot {
        FleetSnapshot::capture(&self.state, &self.world.catalog, recent_alerts)
    }
}
