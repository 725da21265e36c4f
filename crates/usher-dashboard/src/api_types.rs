//! JSON response types for the dashboard API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use usher_core::PendingUser;

/// Response for listing pending users.
#[derive(Debug, Serialize, Deserialize)]
pub struct PendingListResponse {
    pub users: Vec<PendingUserResponse>,
    pub count: usize,
}

/// One pending user.
#[derive(Debug, Serialize, Deserialize)]
pub struct PendingUserResponse {
    pub id: i64,
    pub date_joined: DateTime<Utc>,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
}

impl From<PendingUser> for PendingUserResponse {
    fn from(user: PendingUser) -> Self {
        Self {
            id: user.id.0,
            date_joined: user.date_joined,
            username: user.username,
            email: user.email,
            email_verified: user.email_verified,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
}
