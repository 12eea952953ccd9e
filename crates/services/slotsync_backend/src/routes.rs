// --- File: crates/services/slotsync_backend/src/routes.rs ---

use crate::app_state::AppState;
use crate::handlers::{
    create_group_handler, health_handler, list_slots_handler, recompute_handler,
};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates a router containing all routes of the availability API.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/groups", post(create_group_handler))
        .route("/groups/{group_id}/recompute", post(recompute_handler))
        .route("/groups/{group_id}/slots", get(list_slots_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// The full application router: a greeting at the root and the API nested
/// under `/api`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Welcome to the Slotsync API!" }))
        .nest("/api", routes(state))
        .layer(TraceLayer::new_for_http())
}
