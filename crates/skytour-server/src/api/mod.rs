//! API routes for the SkyTour server.

pub mod error;
pub mod geofence;
pub mod request_id;
mod routes;
pub mod services;
pub mod tours;
pub mod ws;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}

#[cfg(test)]
mod tests;
