//! No-fly zone endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;
use skytour_core::{Coordinate, NoFlyZone};

/// Get the active no-fly zone.
pub async fn get_geofence(State(state): State<Arc<AppState>>) -> Json<NoFlyZone> {
    Json(state.world().no_fly_zone.clone())
}

#[derive(Debug, Deserialize)]
pub struct PointCheckQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct PointCheckResponse {
    pub inside_geofence: bool,
    pub geofence_id: String,
    pub distance_to_center_m: f64,
}

/// Check whether a point falls inside the no-fly zone.
pub async fn check_point(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PointCheckQuery>,
) -> Json<PointCheckResponse> {
    let position = Coordinate::new(query.lat, query.lon);
    let world = state.world();

    Json(PointCheckResponse {
        inside_geofence: world.inside_no_fly_zone(position),
        geofence_id: world.no_fly_zone.id.clone(),
        distance_to_center_m: world.no_fly_zone.distance_to_center_m(position),
    })
}
