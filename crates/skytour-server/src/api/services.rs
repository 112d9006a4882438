//! Bookable service catalog and operator dashboard figures.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;
use skytour_core::{ServiceKind, ServiceListing, ServiceStats, Site, HANGAR_DRONES};

#[derive(Debug, Deserialize)]
pub struct ServicesQuery {
    pub site: Option<Site>,
    pub kind: Option<ServiceKind>,
}

/// Headline numbers for the operator view.
#[derive(Debug, Serialize)]
pub struct OperatorStats {
    pub available_drones: u32,
    pub active_drones: usize,
    pub grounded_drones: usize,
    pub today_orders: u32,
    pub total_revenue: u64,
    pub services: ServiceStats,
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ServicesQuery>,
) -> Json<ServiceListing> {
    Json(state.services().listing(query.site, query.kind))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<OperatorStats> {
    let summary = state.snapshot().summary;
    let services = state.services().stats().clone();
    Json(OperatorStats {
        available_drones: HANGAR_DRONES,
        active_drones: summary.active,
        grounded_drones: summary.grounded,
        today_orders: services.today_orders(),
        total_revenue: services.total_revenue(),
        services,
    })
}
