//! Read-only fleet views handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::catalog::RouteCatalog;
use crate::models::{Alert, DroneState, Site};
use crate::sim::FleetState;

/// Owned copy of the fleet taken between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub tick: u64,
    pub drones: Vec<DroneState>,
    /// Most recent alerts, oldest first
    pub recent_alerts: Vec<Alert>,
    pub total_alerts: usize,
    pub summary: FleetSummary,
}

impl FleetSnapshot {
    pub fn capture(state: &FleetState, catalog: &RouteCatalog, recent_alerts: usize) -> Self {
        Self {
            tick: state.tick,
            drones: state.drones.clone(),
            recent_alerts: state.alerts.recent(recent_alerts).to_vec(),
            total_alerts: state.alerts.len(),
            summary: FleetSummary::from_drones(&state.drones, catalog),
        }
    }

    pub fn drone(&self, drone_id: &str) -> Option<&DroneState> {
        self.drones.iter().find(|d| d.drone_id == drone_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Drones currently flying a task
    pub active: usize,
    pub grounded: usize,
    pub by_site: Vec<SiteActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteActivity {
    pub site: Site,
    pub active: usize,
}

impl FleetSummary {
    /// Per-site activity follows the route each drone actually flies, so a
    /// drone on the fallback route counts at the default route's site.
    pub fn from_drones(drones: &[DroneState], catalog: &RouteCatalog) -> Self {
        let active = drones.iter().filter(|d| d.is_flying).count();
        let by_site = Site::ALL
            .into_iter()
            .map(|site| SiteActivity {
                site,
                active: drones
                    .iter()
                    .filter(|d| d.is_flying && catalog.resolve(&d.assignment).site == site)
                    .count(),
            })
            .collect();

        Self {
            active,
            grounded: drones.len() - active,
            by_site,
        }
    }

    pub fn active_at(&self, site: Site) -> usize {
        self.by_site
            .iter()
            .find(|s| s.site == site)
            .map_or(0, |s| s.active)
    }
}
