//! Request handlers for the dashboard.
//!
//! Page and action handlers lock the controller for their whole run, so
//! interactions are applied one at a time in arrival order.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use usher_core::UserId;

use crate::controller::ApproveOutcome;
use crate::edit_form::ViewRegion;
use crate::error::DashboardError;
use crate::pages;
use crate::state::AppState;

// =============================================================================
// Page Handlers (HTML responses)
// =============================================================================

/// Handler for the dashboard page. Repopulates the list on every load.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    let mut dashboard = state.dashboard().await;
    dashboard.populate().await?;
    Ok(Html(pages::dashboard_page(dashboard.view(), state.widget())))
}

/// Row selection.
pub async fn select_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Html<String>, DashboardError> {
    let mut dashboard = state.dashboard().await;
    dashboard.select(id).await?;
    Ok(Html(pages::dashboard_panel(dashboard.view())))
}

/// Open the edit form for the user the button was rendered for.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Response, DashboardError> {
    let dashboard = state.dashboard().await;
    let target = dashboard.edit(id)?;

    let response = match target.region {
        ViewRegion::NewTab => {
            Html(pages::edit_opened_fragment(dashboard.view(), &target)).into_response()
        }
        ViewRegion::Current => (
            [("HX-Redirect", target.url.clone())],
            Html(pages::dashboard_panel(dashboard.view())),
        )
            .into_response(),
    };
    Ok(response)
}

/// Approve a user. Validation failures come back as an alert in the panel,
/// not as an error status.
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Html<String>, DashboardError> {
    let mut dashboard = state.dashboard().await;
    if let ApproveOutcome::Rejected(alert) = dashboard.approve(id).await? {
        tracing::debug!(title = %alert.title, "Showing approval alert");
    }
    Ok(Html(pages::dashboard_panel(dashboard.view())))
}

/// Remove a user.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Html<String>, DashboardError> {
    let mut dashboard = state.dashboard().await;
    dashboard.remove(id).await?;
    Ok(Html(pages::dashboard_panel(dashboard.view())))
}

// =============================================================================
// API Handlers (JSON responses)
// =============================================================================

pub mod api {
    use super::*;
    use crate::api_types::*;
    use axum::Json;

    /// Pending users, read straight from the store without touching the
    /// selection.
    pub async fn pending(
        State(state): State<AppState>,
    ) -> Result<Json<PendingListResponse>, DashboardError> {
        let users = state.store().list_pending().await?;
        Ok(Json(PendingListResponse {
            count: users.len(),
            users: users.into_iter().map(PendingUserResponse::from).collect(),
        }))
    }

    pub async fn healthz() -> Json<HealthResponse> {
        Json(HealthResponse {
            ok: true,
            service: "usher-dashboard".to_string(),
        })
    }
}
