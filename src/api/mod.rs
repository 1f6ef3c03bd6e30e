//! REST API over a single shared household.
//!
//! Zone and device CRUD, battery reads and writes, deficit resolution,
//! consumption, and estimator endpoints. Every request locks the one
//! household, so a pending decrease and its resolution are serialized.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tokio::sync::Mutex;

use crate::sim::Household;

pub use types::ErrorResponse;

/// Application state shared across all request handlers.
pub struct AppState {
    /// The household every endpoint reads and mutates.
    pub household: Mutex<Household>,
}

impl AppState {
    pub fn new(household: Household) -> Arc<Self> {
        Arc::new(Self {
            household: Mutex::new(household),
        })
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/zones", get(handlers::list_zones).post(handlers::add_zone))
        .route("/zones/{zone_id}", delete(handlers::remove_zone))
        .route("/zones/{zone_id}/devices", post(handlers::add_device))
        .route(
            "/zones/{zone_id}/devices/{device_id}",
            patch(handlers::update_device).delete(handlers::remove_device),
        )
        .route("/device-types", get(handlers::device_types))
        .route(
            "/battery",
            get(handlers::get_battery).post(handlers::set_battery),
        )
        .route("/battery/increase", post(handlers::increase_battery))
        .route("/battery/decrease", post(handlers::decrease_battery))
        .route("/deficit/choice", post(handlers::choose_device))
        .route("/deficit/cancel", post(handlers::cancel_deficit))
        .route("/consumption", get(handlers::get_consumption))
        .route("/report", get(handlers::get_report))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
