//! Simulator setup for command line runs.

use anyhow::{bail, Result};
use skytour_core::{default_fleet, DroneState, NoFlyZone, RouteCatalog, Simulator, World};
use std::sync::Arc;

/// Built-in catalog and fleet, optionally with a different fence radius or
/// only some of the drones.
pub fn build_simulator(no_fly_radius_m: f64, only: &[String]) -> Result<Simulator> {
    if !no_fly_radius_m.is_finite() || no_fly_radius_m < 0.0 {
        bail!("no-fly radius must be a non-negative number, got {no_fly_radius_m}");
    }

    let catalog = RouteCatalog::builtin();
    let mut drones: Vec<DroneState> = default_fleet(&catalog);
    if !only.is_empty() {
        if let Some(unknown) = only
            .iter()
            .find(|id| !drones.iter().any(|d| &d.drone_id == *id))
        {
            bail!("unknown drone {unknown}");
        }
        drones.retain(|d| only.contains(&d.drone_id));
    }

    let zone = NoFlyZone {
        radius_m: no_fly_radius_m,
        ..NoFlyZone::default()
    };
    Ok(Simulator::new(Arc::new(World::new(catalog, zone)), drones))
}
