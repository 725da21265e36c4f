//! Route definitions for the dashboard.

use crate::auth;
use crate::handlers;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Create the dashboard router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::home))
        // Interactions, each answered with the re-rendered panel
        .route("/users/{id}/select", post(handlers::select_user))
        .route("/users/{id}/edit", post(handlers::edit))
        .route("/users/{id}/approve", post(handlers::approve))
        .route("/users/{id}/remove", post(handlers::remove))
        // API
        .route("/api/pending", get(handlers::api::pending))
        .route("/healthz", get(handlers::api::healthz))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_operator))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
