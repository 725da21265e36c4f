//! Operator access check.
//!
//! Authentication happens in front of the dashboard; the fronting proxy
//! forwards the caller's groups in a header. When authorized groups are
//! configured, requests without one of them are refused.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::DashboardError;
use crate::state::AppState;

/// Paths reachable without a group check.
const OPEN_PATHS: &[&str] = &["/healthz"];

/// Reject callers outside the authorized groups.
pub async fn require_operator(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if OPEN_PATHS.contains(&path) {
        return next.run(request).await;
    }

    let access = state.access();
    let groups = request
        .headers()
        .get(access.groups_header.as_str())
        .and_then(|value| value.to_str().ok());

    if access.allows(groups) {
        next.run(request).await
    } else {
        tracing::warn!(path = %path, groups = ?groups, "Rejected request outside authorized groups");
        DashboardError::NotAuthorized.into_response()
    }
}
