//! Error types for the dashboard crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use usher_core::{StoreError, UserId};

/// Errors that can occur in the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failed to start the server.
    #[error("failed to start dashboard: {0}")]
    StartupFailed(String),

    /// Caller is not in an authorized group.
    #[error("not authorized")]
    NotAuthorized,

    /// An action was invoked with no row selected.
    #[error("no user selected")]
    NoSelection,

    /// The action was rendered for a row that is no longer selected.
    #[error("user {0} is no longer selected")]
    SelectionChanged(UserId),

    /// Edit was invoked but no edit form is configured.
    #[error("no edit form configured")]
    EditUnavailable,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Database error.
    #[error("database error: {0}")]
    DatabaseError(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DashboardError::NotFound(format!("user {id}")),
            StoreError::Validation(errors) => DashboardError::InvalidRequest(errors.to_string()),
            StoreError::Database(msg) => DashboardError::DatabaseError(msg),
            StoreError::Internal(msg) => DashboardError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::NotAuthorized => StatusCode::FORBIDDEN,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::SelectionChanged(_) => StatusCode::CONFLICT,
            DashboardError::NoSelection
            | DashboardError::EditUnavailable
            | DashboardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Dashboard request failed");
        }

        (status, self.to_string()).into_response()
    }
}
