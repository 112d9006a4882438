use thiserror::Error;

/// Problems found while building a route catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Route catalog is empty")]
    Empty,
    #[error("Duplicate route id {0}")]
    DuplicateRoute(String),
    #[error("Route {0} has no waypoints")]
    EmptyRoute(String),
    #[error("Default route {0} is not in the catalog")]
    UnknownDefault(String),
}

/// Operator requests the simulator refuses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("Unknown drone {0}")]
    UnknownDrone(String),
    #[error("Drone {0} is already flying")]
    AlreadyFlying(String),
}
