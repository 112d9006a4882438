//! REST API routes.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::request_id::RequestId;
use crate::api::{geofence, services, tours, ws};
use crate::state::AppState;
use skytour_core::{Alert, DroneState, FleetSnapshot, FleetSummary};

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        // Fleet
        .route("/v1/fleet", get(get_fleet))
        .route("/v1/fleet/summary", get(get_fleet_summary))
        .route("/v1/drones", get(list_drones))
        .route("/v1/drones/:drone_id", get(get_drone))
        .route("/v1/drones/:drone_id/resume", post(resume_drone))
        .route("/v1/alerts", get(list_alerts))
        // Static configuration
        .route("/v1/routes", get(tours::list_routes))
        .route("/v1/routes/:route_id", get(tours::get_route))
        .route("/v1/services", get(services::list_services))
        .route("/v1/stats", get(services::get_stats))
        .route("/v1/geofence", get(geofence::get_geofence))
        .route("/v1/geofence/check", get(geofence::check_point))
        // WebSocket streaming
        .route("/v1/stream", get(ws::ws_handler))
        .layer(middleware::from_fn(crate::api::request_id::ensure_request_id))
}

// === Request types ===

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub limit: Option<usize>,
}

// === Handlers ===

async fn get_fleet(State(state): State<Arc<AppState>>) -> Json<FleetSnapshot> {
    Json(state.snapshot())
}

async fn get_fleet_summary(State(state): State<Arc<AppState>>) -> Json<FleetSummary> {
    Json(state.snapshot().summary)
}

async fn list_drones(State(state): State<Arc<AppState>>) -> Json<Vec<DroneState>> {
    Json(state.get_all_drones())
}

async fn get_drone(
    State(state): State<Arc<AppState>>,
    Path(drone_id): Path<String>,
) -> Result<Json<DroneState>, ApiError> {
    state
        .get_drone(&drone_id)
        .map(Json)
        .ok_or(ApiError::DroneNotFound(drone_id))
}

async fn resume_drone(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(drone_id): Path<String>,
) -> Result<Json<DroneState>, ApiError> {
    let drone = state.resume(&drone_id)?;
    tracing::info!(request_id = %request_id, "Operator resumed {}", drone_id);
    Ok(Json(drone))
}

async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertsQuery>,
) -> Json<Vec<Alert>> {
    let limit = query.limit.unwrap_or(state.config().recent_alerts);
    Json(state.recent_alerts(limit))
}
