//! Published tour route endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;
use skytour_core::{Route, Site};

#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    pub site: Option<Site>,
}

/// Route plus derived figures for the booking view.
#[derive(Debug, Serialize)]
pub struct RouteView {
    #[serde(flatten)]
    pub route: Route,
    pub length_m: f64,
    pub site_name: &'static str,
}

impl From<&Route> for RouteView {
    fn from(route: &Route) -> Self {
        Self {
            length_m: route.length_m(),
            site_name: route.site.display_name(),
            route: route.clone(),
        }
    }
}

/// List routes, optionally for one site.
pub async fn list_routes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoutesQuery>,
) -> Json<Vec<RouteView>> {
    let catalog = &state.world().catalog;
    let routes = catalog
        .routes()
        .iter()
        .filter(|r| query.site.map_or(true, |site| r.site == site))
        .map(RouteView::from)
        .collect();
    Json(routes)
}

pub async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteView>, ApiError> {
    state
        .world()
        .catalog
        .get(&route_id)
        .map(|route| Json(RouteView::from(route)))
        .ok_or(ApiError::RouteNotFound(route_id))
}
