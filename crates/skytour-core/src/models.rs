//! Core data models for the drone tour simulator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::spatial;

/// Default radius of the hot-spring privacy no-fly zone.
pub const DEFAULT_NO_FLY_RADIUS_M: f64 = 500.0;

/// A geographic position in decimal degrees, serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

/// Tourist sites served by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    /// Basum Tso sacred lake
    BasumTso,
    /// Haba Tso glacier
    HabaTso,
    /// Nianlang hot springs
    Nianlang,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::BasumTso, Site::HabaTso, Site::Nianlang];

    pub fn display_name(self) -> &'static str {
        match self {
            Site::BasumTso => "Basum Tso",
            Site::HabaTso => "Haba Tso Glacier",
            Site::Nianlang => "Nianlang Hot Springs",
        }
    }

    /// Map center used by the site overview.
    pub fn center(self) -> Coordinate {
        match self {
            Site::BasumTso => Coordinate::new(29.5, 90.5),
            Site::HabaTso => Coordinate::new(29.7, 90.3),
            Site::Nianlang => Coordinate::new(29.6, 90.4),
        }
    }

    /// Glacier flights land at the end of the route to offload footage.
    pub fn offloads_at_route_end(self) -> bool {
        matches!(self, Site::HabaTso)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A sightseeing flight route sold to tourists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub site: Site,
    /// Price in CNY
    pub price: u32,
    pub duration_min: u32,
    /// Ordered waypoints of the flight path (never empty once in a catalog)
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Restriction note shown to tourists (e.g. nearby privacy fence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,
}

impl Route {
    pub fn start(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }

    pub fn waypoint(&self, index: usize) -> Option<Coordinate> {
        self.coordinates.get(index).copied()
    }

    pub fn last_index(&self) -> usize {
        self.coordinates.len().saturating_sub(1)
    }

    /// Index of the waypoint after `index`, wrapping back to the start.
    pub fn next_index(&self, index: usize) -> usize {
        match self.coordinates.len() {
            0 => 0,
            len => (index + 1) % len,
        }
    }

    pub fn length_m(&self) -> f64 {
        spatial::path_length_m(&self.coordinates)
    }

    pub fn assignment(&self) -> RouteAssignment {
        RouteAssignment {
            site: self.site,
            route_name: self.name.clone(),
        }
    }
}

/// Route a drone has been dispatched on, referenced by site and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAssignment {
    pub site: Site,
    pub route_name: String,
}

impl RouteAssignment {
    pub fn new(site: Site, route_name: impl Into<String>) -> Self {
        Self {
            site,
            route_name: route_name.into(),
        }
    }
}

/// Circular exclusion area drones may never enter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoFlyZone {
    pub id: String,
    pub name: String,
    pub center: Coordinate,
    pub radius_m: f64,
}

impl Default for NoFlyZone {
    fn default() -> Self {
        Self {
            id: "nianlang-privacy".to_string(),
            name: "Nianlang hot spring privacy area".to_string(),
            center: Site::Nianlang.center(),
            radius_m: DEFAULT_NO_FLY_RADIUS_M,
        }
    }
}

impl NoFlyZone {
    pub fn distance_to_center_m(&self, position: Coordinate) -> f64 {
        spatial::distance_m(position, self.center)
    }

    /// True iff `position` is strictly closer to the center than the radius.
    pub fn contains(&self, position: Coordinate) -> bool {
        self.distance_to_center_m(position) < self.radius_m
    }
}

/// Why a drone stopped flying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundedReason {
    /// Next waypoint was inside the no-fly zone; forced hover
    GeofenceViolation,
    /// Finished the glacier route and is offloading footage
    DataOffload,
}

/// Mutable simulation state of one drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneState {
    pub drone_id: String,
    pub assignment: RouteAssignment,
    pub position: Coordinate,
    /// Index into the resolved route's waypoints
    pub route_index: usize,
    #[serde(default)]
    pub heading_deg: f64,
    pub is_flying: bool,
    pub status: String,
    #[serde(default)]
    pub grounded_reason: Option<GroundedReason>,
}

impl DroneState {
    /// Put a drone at the start of `route`, flying.
    pub fn launch(drone_id: impl Into<String>, route: &Route) -> Self {
        Self {
            drone_id: drone_id.into(),
            assignment: route.assignment(),
            position: route.start().unwrap_or_else(|| route.site.center()),
            route_index: 0,
            heading_deg: 0.0,
            is_flying: true,
            status: flying_status(&route.name),
            grounded_reason: None,
        }
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_flying
    }

    pub(crate) fn ground(&mut self, reason: GroundedReason) {
        self.is_flying = false;
        self.grounded_reason = Some(reason);
        self.status = match reason {
            GroundedReason::GeofenceViolation => {
                "WARNING: entered no-fly zone, forced hover".to_string()
            }
            GroundedReason::DataOffload => "Offloading 8K video footage".to_string(),
        };
    }
}

pub(crate) fn flying_status(route_name: &str) -> String {
    format!("Flying {route_name}")
}

/// Recorded geofence violation, retained for operator display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Position in the alert log, starting at 1
    pub sequence: u64,
    pub drone_id: String,
    pub geofence_id: String,
    /// Simulation tick that raised the alert
    pub tick: u64,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}
