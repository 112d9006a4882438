//! SkyTour core: route and service catalogs, geofence math and the drone
//! motion simulator.

pub mod alerts;
pub mod catalog;
pub mod error;
pub mod models;
pub mod services;
pub mod sim;
pub mod snapshot;
pub mod spatial;

pub use alerts::{AlertLog, DEFAULT_RECENT_ALERTS};
pub use catalog::{default_fleet, RouteCatalog, DEFAULT_ROUTE_ID};
pub use error::{CatalogError, SimError};
pub use models::{
    Alert, Coordinate, DroneState, GroundedReason, NoFlyZone, Route, RouteAssignment, Site,
    DEFAULT_NO_FLY_RADIUS_M,
};
pub use services::{
    ContentKind, ContentService, ContentStats, RentalKind, RentalService, RentalStats,
    ServiceCatalog, ServiceKind, ServiceListing, ServiceStats, HANGAR_DRONES,
};
pub use sim::{step, FleetState, Simulator, TickReport, World};
pub use snapshot::{FleetSnapshot, FleetSummary, SiteActivity};
pub use spatial::haversine_distance;
